//! HTTP gateway integration tests.
//!
//! Drives the full router via `tower::ServiceExt::oneshot` with a stubbed
//! stock-lookup collaborator, so no network listener or external endpoint is
//! involved.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use girder_api::server::Server;
use girder_api::stock_client::{StockLookup, StockStatus};
use girder_core::Error;

/// Stock stub returning a fixed status, or a lookup failure when `None`.
struct StubStock(Option<StockStatus>);

#[async_trait]
impl StockLookup for StubStock {
    async fn check_stock(&self, _product_id: &str, _postcode: &str) -> girder_core::Result<StockStatus> {
        match self.0 {
            Some(status) => Ok(status),
            None => Err(Error::lookup("stub endpoint unreachable")),
        }
    }
}

fn router_with_stock(stock: StubStock) -> Router {
    Server::builder().stock_lookup(Arc::new(stock)).build().test_router()
}

fn router() -> Router {
    router_with_stock(StubStock(Some(StockStatus::InStock)))
}

fn get(uri: &str) -> Result<Request<Body>> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .context("build request")
}

fn with_json_body(method: &str, uri: &str, body: &Value) -> Result<Request<Body>> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .context("build request")
}

async fn json_body(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .context("read response body")?;
    serde_json::from_slice(&bytes).context("parse JSON body")
}

fn sample_beam(designation: &str) -> Value {
    json!({
        "section_designation": designation,
        "mass_per_metre": 90.0,
        "depth_of_section": 420.0,
        "width_of_section": 180.0
    })
}

#[tokio::test]
async fn list_beams_returns_seed_catalogue() -> Result<()> {
    let response = router().oneshot(get("/beams")?).await.map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["count"], 2);
    assert_eq!(body["beams"][0]["section_designation"], "UB406x178x74");
    assert_eq!(body["beams"][1]["section_designation"], "UB406x178x67");
    Ok(())
}

#[tokio::test]
async fn get_beam_returns_full_record() -> Result<()> {
    let response = router()
        .oneshot(get("/beams/UB406x178x74")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["section_designation"], "UB406x178x74");
    assert_eq!(body["mass_per_metre"], 74.6);
    Ok(())
}

#[tokio::test]
async fn get_missing_beam_is_404_with_stable_code() -> Result<()> {
    let response = router()
        .oneshot(get("/beams/UB999x999x99")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await?;
    assert_eq!(body["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn get_beam_designation_is_case_sensitive() -> Result<()> {
    let response = router()
        .oneshot(get("/beams/ub406x178x74")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_beam_then_get_returns_it() -> Result<()> {
    let server = Server::builder()
        .stock_lookup(Arc::new(StubStock(Some(StockStatus::InStock))))
        .build();

    let created = server
        .test_router()
        .oneshot(with_json_body("POST", "/beams", &sample_beam("UB406x178x90"))?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    assert_eq!(created.status(), StatusCode::CREATED);

    // Absent JSON fields decode to zero.
    let body = json_body(created).await?;
    assert_eq!(body["section_designation"], "UB406x178x90");
    assert_eq!(body["thickness_flange"], 0.0);

    let fetched = server
        .test_router()
        .oneshot(get("/beams/UB406x178x90")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    assert_eq!(fetched.status(), StatusCode::OK);

    let listed = server
        .test_router()
        .oneshot(get("/beams")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    let body = json_body(listed).await?;
    assert_eq!(body["count"], 3);
    Ok(())
}

#[tokio::test]
async fn malformed_create_body_is_400_without_decoder_detail() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/beams")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .context("build request")?;

    let response = router().oneshot(request).await.map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert_eq!(body["code"], "BAD_REQUEST");
    // The raw serde message stays in the logs.
    let message = body["message"].as_str().context("message field")?;
    assert!(!message.contains("expected"));
    assert!(!message.contains("line"));
    Ok(())
}

#[tokio::test]
async fn update_beam_replaces_full_record() -> Result<()> {
    let server = Server::builder()
        .stock_lookup(Arc::new(StubStock(Some(StockStatus::InStock))))
        .build();

    let response = server
        .test_router()
        .oneshot(with_json_body(
            "PUT",
            "/beams/UB406x178x74",
            &sample_beam("UB406x178x74"),
        )?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = server
        .test_router()
        .oneshot(get("/beams/UB406x178x74")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    let body = json_body(fetched).await?;
    assert_eq!(body["mass_per_metre"], 90.0);
    // Fields absent from the replacement body are zeroed, not preserved.
    assert_eq!(body["thickness_flange"], 0.0);
    Ok(())
}

#[tokio::test]
async fn update_missing_beam_is_404_and_store_untouched() -> Result<()> {
    let server = Server::builder()
        .stock_lookup(Arc::new(StubStock(Some(StockStatus::InStock))))
        .build();

    let response = server
        .test_router()
        .oneshot(with_json_body(
            "PUT",
            "/beams/UB999x999x99",
            &sample_beam("UB999x999x99"),
        )?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let listed = server
        .test_router()
        .oneshot(get("/beams")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    let body = json_body(listed).await?;
    assert_eq!(body["count"], 2);
    Ok(())
}

#[tokio::test]
async fn delete_beam_then_get_is_404() -> Result<()> {
    let server = Server::builder()
        .stock_lookup(Arc::new(StubStock(Some(StockStatus::InStock))))
        .build();

    let deleted = server
        .test_router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/beams/UB406x178x74")
                .body(Body::empty())
                .context("build request")?,
        )
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let fetched = server
        .test_router()
        .oneshot(get("/beams/UB406x178x74")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_missing_beam_is_404() -> Result<()> {
    let response = router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/beams/UB999x999x99")
                .body(Body::empty())
                .context("build request")?,
        )
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn stock_lookup_echoes_parameters_and_status() -> Result<()> {
    let response = router_with_stock(StubStock(Some(StockStatus::OutOfStock)))
        .oneshot(get("/stock?productId=p100&postcode=SW1A1AA")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["productId"], "p100");
    assert_eq!(body["postcode"], "SW1A1AA");
    assert_eq!(body["status"], "OutOfStock");
    Ok(())
}

#[tokio::test]
async fn stock_lookup_requires_product_id() -> Result<()> {
    let response = router()
        .oneshot(get("/stock?postcode=SW1A1AA")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn stock_lookup_requires_postcode() -> Result<()> {
    let response = router()
        .oneshot(get("/stock?productId=p100&postcode=")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn failed_stock_lookup_is_500_with_stable_code() -> Result<()> {
    let response = router_with_stock(StubStock(None))
        .oneshot(get("/stock?productId=p100&postcode=SW1A1AA")?)
        .await
        .map_err(|err| -> anyhow::Error { match err {} })?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await?;
    assert_eq!(body["code"], "LOOKUP_FAILED");
    // The transport detail must not leak to the client.
    let message = body["message"].as_str().context("message field")?;
    assert!(!message.contains("unreachable"));
    Ok(())
}
