//! # girder-api
//!
//! HTTP/gRPC composition layer for the Girder section catalogue.
//!
//! This crate provides the API surface, handling:
//!
//! - **Routing**: HTTP and gRPC endpoint configuration
//! - **Service Wiring**: the shared catalogue store and the stock-lookup client
//! - **Observability**: request tracing and health checks
//!
//! ## Design Principles
//!
//! This crate is a **thin composition layer**: catalogue semantics live in
//! `girder-core`, the wire contract in `girder-proto`.
//!
//! ## Endpoints
//!
//! ```text
//! HTTP:
//!   GET    /                     - Service descriptor
//!   GET    /health               - Health check
//!   GET    /openapi.json         - OpenAPI spec
//!   GET    /beams                - List beams
//!   GET    /beams/:designation   - Get beam
//!   POST   /beams                - Create beam
//!   PUT    /beams/:designation   - Replace beam
//!   DELETE /beams/:designation   - Delete beam
//!   GET    /stock                - Merchant stock lookup
//!
//! gRPC:
//!   girder.v1.CatalogService - Catalogue operations + stock lookup
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use girder_api::server::Server;
//!
//! let server = Server::builder()
//!     .http_port(8080)
//!     .grpc_port(9090)
//!     .build();
//!
//! server.serve().await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod grpc;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod stock_client;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::server::Server;
    pub use crate::stock_client::{StockClient, StockLookup, StockStatus};
}
