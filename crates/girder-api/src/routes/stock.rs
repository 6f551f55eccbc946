//! Merchant stock lookup route.
//!
//! A thin pass-through over the outbound availability client. The lookup is
//! best-effort: a failed upstream call surfaces as `LOOKUP_FAILED`, never as
//! a retried or cached result.
//!
//! ## Routes
//!
//! - `GET /stock?productId=...&postcode=...` - Check branch stock availability

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiErrorBody};
use crate::server::AppState;

/// Query parameters for a stock lookup.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StockQuery {
    /// Merchant product identifier.
    pub product_id: Option<String>,
    /// UK postcode to search branches around.
    pub postcode: Option<String>,
}

/// Stock lookup response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockStatusResponse {
    /// Echo of the requested product identifier.
    pub product_id: String,
    /// Echo of the requested postcode.
    pub postcode: String,
    /// Derived availability: `InStock`, `OutOfStock`, or `NotAvailable`.
    pub status: String,
}

/// Creates stock routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stock", get(get_stock_status))
}

/// Check merchant branch stock availability for a product.
///
/// GET /stock
#[utoipa::path(
    get,
    path = "/stock",
    tag = "stock",
    params(StockQuery),
    responses(
        (status = 200, description = "Stock status derived", body = StockStatusResponse),
        (status = 400, description = "Missing query parameter", body = ApiErrorBody),
        (status = 500, description = "Lookup failed", body = ApiErrorBody),
    )
)]
pub(crate) async fn get_stock_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let product_id = query
        .product_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("productId query parameter is required"))?;
    let postcode = query
        .postcode
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("postcode query parameter is required"))?;

    tracing::debug!(product_id = %product_id, postcode = %postcode, "checking stock");
    let status = state.stock.check_stock(product_id, postcode).await?;

    Ok(Json(StockStatusResponse {
        product_id: product_id.to_string(),
        postcode: postcode.to_string(),
        status: status.as_str().to_string(),
    }))
}
