//! HTTP route handlers.

pub mod beams;
pub mod stock;

use std::sync::Arc;

use axum::Router;

use crate::server::AppState;

/// Catalogue and stock routes.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().merge(beams::routes()).merge(stock::routes())
}
