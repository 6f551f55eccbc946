//! `OpenAPI` (3.1) specification generation for `girder-api`.
//!
//! Served at `GET /openapi.json`; also usable to generate external clients.

use utoipa::OpenApi;

/// `OpenAPI` documentation for the Girder REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Girder API",
        description = "Structural steel beam catalogue with merchant stock lookup"
    ),
    paths(
        crate::routes::beams::list_beams,
        crate::routes::beams::get_beam,
        crate::routes::beams::create_beam,
        crate::routes::beams::update_beam,
        crate::routes::beams::delete_beam,
        crate::routes::stock::get_stock_status,
    ),
    components(
        schemas(
            crate::error::ApiErrorBody,
            crate::routes::beams::ListBeamsResponse,
            crate::routes::stock::StockStatusResponse,
            girder_core::section::Beam,
        )
    ),
    tags(
        (name = "beams", description = "Beam catalogue operations"),
        (name = "stock", description = "Merchant stock availability"),
    )
)]
pub struct ApiDoc;

/// Returns the generated `OpenAPI` spec.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
