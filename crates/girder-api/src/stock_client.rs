//! Outbound GraphQL client for merchant branch stock availability.
//!
//! One synchronous request/response call per invocation: no retry, no
//! backoff, no batching. The lookup is advisory and best-effort; every
//! failure is reported once to the caller as [`girder_core::Error::Lookup`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use girder_core::{Error, Result};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const OPERATION_NAME: &str = "tpplcProductCollectionAvailability";

const QUERY_DOCUMENT: &str = "query tpplcProductCollectionAvailability($branchId: String, $branchLimit: Int, $postcode: String, $productId: String!, $withinRadius: Float, $brandId: ID!) { tpplcBrand(brandId: $brandId) { productCollectionAvailability(branchId: $branchId branchLimit: $branchLimit postcode: $postcode productId: $productId withinRadius: $withinRadius) { branchId stockLevel stockUom __typename } __typename } }";

// The endpoint rejects non-browser agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

const BRAND_ID: &str = "tp";

/// Tri-state stock availability derived from branch-level stock levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum StockStatus {
    /// At least one branch reports stock level above zero.
    InStock,
    /// Branches were returned but every stock level is zero.
    OutOfStock,
    /// No branch availability records were returned.
    NotAvailable,
}

impl StockStatus {
    /// Returns the wire representation shared by both protocols.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "InStock",
            Self::OutOfStock => "OutOfStock",
            Self::NotAvailable => "NotAvailable",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stock-lookup collaborator contract.
///
/// Both gateways depend on this trait rather than the concrete client so
/// tests can inject a stub.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Checks branch availability for a product/postcode pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::Lookup` when the endpoint is unreachable, answers with
    /// a non-success status, or returns an undecodable body.
    async fn check_stock(&self, product_id: &str, postcode: &str) -> Result<StockStatus>;
}

/// HTTP client for the merchant stock-availability GraphQL endpoint.
#[derive(Clone)]
pub struct StockClient {
    endpoint: String,
    client: reqwest::Client,
}

impl StockClient {
    /// Creates a new client targeting the given endpoint URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    operation_name: &'a str,
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Variables<'a> {
    product_id: &'a str,
    postcode: &'a str,
    brand_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: ResponseData,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseData {
    #[serde(rename = "tpplcBrand", default)]
    tpplc_brand: BrandAvailability,
}

#[derive(Debug, Default, Deserialize)]
struct BrandAvailability {
    #[serde(rename = "productCollectionAvailability", default)]
    product_collection_availability: Vec<BranchAvailability>,
}

/// One branch-level availability record.
#[derive(Debug, Default, Deserialize)]
struct BranchAvailability {
    #[serde(rename = "stockLevel", default)]
    stock_level: f64,
}

/// Derives the tri-state status from branch availability records.
fn derive_status(branches: &[BranchAvailability]) -> StockStatus {
    if branches.is_empty() {
        return StockStatus::NotAvailable;
    }
    if branches.iter().any(|branch| branch.stock_level > 0.0) {
        StockStatus::InStock
    } else {
        StockStatus::OutOfStock
    }
}

#[async_trait]
impl StockLookup for StockClient {
    async fn check_stock(&self, product_id: &str, postcode: &str) -> Result<StockStatus> {
        let body = GraphQlRequest {
            operation_name: OPERATION_NAME,
            query: QUERY_DOCUMENT,
            variables: Variables {
                product_id,
                postcode,
                brand_id: BRAND_ID,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::lookup(format!("request to stock endpoint failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::lookup(format!(
                "stock endpoint returned status {}",
                response.status()
            )));
        }

        let decoded: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| Error::lookup(format!("invalid stock response: {e}")))?;

        Ok(derive_status(
            &decoded.data.tpplc_brand.product_collection_availability,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    fn branch(stock_level: f64) -> BranchAvailability {
        BranchAvailability { stock_level }
    }

    #[test]
    fn empty_branch_list_is_not_available() {
        assert_eq!(derive_status(&[]), StockStatus::NotAvailable);
    }

    #[test]
    fn all_zero_branches_are_out_of_stock() {
        assert_eq!(
            derive_status(&[branch(0.0), branch(0.0)]),
            StockStatus::OutOfStock
        );
    }

    #[test]
    fn any_positive_branch_is_in_stock() {
        assert_eq!(
            derive_status(&[branch(0.0), branch(3.0)]),
            StockStatus::InStock
        );
    }

    #[test]
    fn status_wire_strings_are_stable() {
        assert_eq!(StockStatus::InStock.as_str(), "InStock");
        assert_eq!(StockStatus::OutOfStock.as_str(), "OutOfStock");
        assert_eq!(StockStatus::NotAvailable.as_str(), "NotAvailable");
    }

    async fn spawn_stub(status: axum::http::StatusCode, body: serde_json::Value) -> String {
        let app = Router::new().route(
            "/graphql",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{addr}/graphql")
    }

    fn availability_body(levels: &[f64]) -> serde_json::Value {
        let branches: Vec<serde_json::Value> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| json!({ "branchId": format!("B{i}"), "stockLevel": level }))
            .collect();
        json!({
            "data": {
                "tpplcBrand": {
                    "productCollectionAvailability": branches
                }
            }
        })
    }

    #[tokio::test]
    async fn check_stock_reports_in_stock() {
        let endpoint =
            spawn_stub(axum::http::StatusCode::OK, availability_body(&[0.0, 4.0])).await;
        let client = StockClient::new(endpoint);

        let status = client.check_stock("p100", "SW1A1AA").await.expect("lookup");
        assert_eq!(status, StockStatus::InStock);
    }

    #[tokio::test]
    async fn check_stock_reports_not_available_for_empty_list() {
        let endpoint = spawn_stub(axum::http::StatusCode::OK, availability_body(&[])).await;
        let client = StockClient::new(endpoint);

        let status = client.check_stock("p100", "SW1A1AA").await.expect("lookup");
        assert_eq!(status, StockStatus::NotAvailable);
    }

    #[tokio::test]
    async fn check_stock_maps_non_success_status_to_lookup_error() {
        let endpoint = spawn_stub(
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": "down" }),
        )
        .await;
        let client = StockClient::new(endpoint);

        let result = client.check_stock("p100", "SW1A1AA").await;
        assert!(matches!(result, Err(Error::Lookup { .. })));
    }

    #[tokio::test]
    async fn check_stock_maps_unreachable_endpoint_to_lookup_error() {
        // Nothing listens on this port.
        let client = StockClient::new("http://127.0.0.1:1/graphql");

        let result = client.check_stock("p100", "SW1A1AA").await;
        assert!(matches!(result, Err(Error::Lookup { .. })));
    }

    #[tokio::test]
    async fn check_stock_posts_fixed_operation_and_brand() {
        // Echo stub: returns 400 unless the request body carries the fixed
        // operation name and brand id.
        let app = Router::new().route(
            "/graphql",
            post(|Json(body): Json<serde_json::Value>| async move {
                let ok = body["operationName"] == OPERATION_NAME
                    && body["variables"]["brandId"] == BRAND_ID
                    && body["variables"]["productId"] == "p100"
                    && body["variables"]["postcode"] == "SW1A1AA";
                if ok {
                    (
                        axum::http::StatusCode::OK,
                        Json(json!({ "data": { "tpplcBrand": {
                            "productCollectionAvailability": [{ "branchId": "B1", "stockLevel": 1.0 }]
                        } } })),
                    )
                } else {
                    (axum::http::StatusCode::BAD_REQUEST, Json(json!({})))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = StockClient::new(format!("http://{addr}/graphql"));
        let status = client.check_stock("p100", "SW1A1AA").await.expect("lookup");
        assert_eq!(status, StockStatus::InStock);
    }
}
