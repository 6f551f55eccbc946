//! Beam catalogue API routes.
//!
//! CRUD over the shared in-memory catalogue. Writes are full-record: a PUT
//! replaces every field of the stored beam, and fields absent from the JSON
//! body decode to zero.
//!
//! ## Routes
//!
//! - `GET    /beams` - List all beams
//! - `GET    /beams/{designation}` - Get beam by designation
//! - `POST   /beams` - Create a beam
//! - `PUT    /beams/{designation}` - Replace a beam
//! - `DELETE /beams/{designation}` - Delete a beam

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiErrorBody};
use crate::server::AppState;
use girder_core::section::Beam;

/// List beams response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListBeamsResponse {
    /// Number of beams in the catalogue.
    pub count: usize,
    /// All beams, in insertion order.
    pub beams: Vec<Beam>,
}

/// Creates beam routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/beams", get(list_beams).post(create_beam))
        .route(
            "/beams/:designation",
            get(get_beam).put(update_beam).delete(delete_beam),
        )
}

/// Unwraps a decoded JSON body, logging the rejection detail internally.
fn decode_body(body: Result<Json<Beam>, JsonRejection>) -> Result<Beam, ApiError> {
    match body {
        Ok(Json(beam)) => Ok(beam),
        Err(rejection) => {
            tracing::debug!(detail = %rejection, "rejected beam payload");
            Err(ApiError::bad_request("invalid beam payload"))
        }
    }
}

/// List all beams.
///
/// GET /beams
#[utoipa::path(
    get,
    path = "/beams",
    tag = "beams",
    responses(
        (status = 200, description = "Beams listed", body = ListBeamsResponse),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn list_beams(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let beams = state.catalog.list()?;

    Ok(Json(ListBeamsResponse {
        count: beams.len(),
        beams,
    }))
}

/// Get a beam by designation.
///
/// GET /beams/{designation}
#[utoipa::path(
    get,
    path = "/beams/{designation}",
    tag = "beams",
    params(
        ("designation" = String, Path, description = "Section designation, e.g. UB406x178x74")
    ),
    responses(
        (status = 200, description = "Beam found", body = Beam),
        (status = 404, description = "Not found", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn get_beam(
    State(state): State<Arc<AppState>>,
    Path(designation): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let beam = state
        .catalog
        .get(&designation)?
        .ok_or_else(|| ApiError::not_found(format!("beam not found: {designation}")))?;

    Ok(Json(beam))
}

/// Create a beam.
///
/// POST /beams
#[utoipa::path(
    post,
    path = "/beams",
    tag = "beams",
    request_body = Beam,
    responses(
        (status = 201, description = "Beam created", body = Beam),
        (status = 400, description = "Bad request", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn create_beam(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Beam>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let beam = decode_body(body)?;

    tracing::info!(designation = %beam.section_designation, "creating beam");
    state.catalog.insert(beam.clone())?;

    Ok((StatusCode::CREATED, Json(beam)))
}

/// Replace a beam.
///
/// PUT /beams/{designation}
///
/// Full-record replacement: fields absent from the body are zeroed.
#[utoipa::path(
    put,
    path = "/beams/{designation}",
    tag = "beams",
    params(
        ("designation" = String, Path, description = "Section designation of the beam to replace")
    ),
    request_body = Beam,
    responses(
        (status = 200, description = "Beam replaced", body = Beam),
        (status = 400, description = "Bad request", body = ApiErrorBody),
        (status = 404, description = "Not found", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn update_beam(
    State(state): State<Arc<AppState>>,
    Path(designation): Path<String>,
    body: Result<Json<Beam>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let beam = decode_body(body)?;

    tracing::info!(designation = %designation, "replacing beam");
    let replaced = state
        .catalog
        .replace(&designation, beam)?
        .ok_or_else(|| ApiError::not_found(format!("beam not found: {designation}")))?;

    Ok(Json(replaced))
}

/// Delete a beam.
///
/// DELETE /beams/{designation}
#[utoipa::path(
    delete,
    path = "/beams/{designation}",
    tag = "beams",
    params(
        ("designation" = String, Path, description = "Section designation of the beam to delete")
    ),
    responses(
        (status = 204, description = "Beam deleted"),
        (status = 404, description = "Not found", body = ApiErrorBody),
        (status = 500, description = "Internal error", body = ApiErrorBody),
    )
)]
pub(crate) async fn delete_beam(
    State(state): State<Arc<AppState>>,
    Path(designation): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!(designation = %designation, "deleting beam");

    if state.catalog.remove(&designation)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!(
            "beam not found: {designation}"
        )))
    }
}
