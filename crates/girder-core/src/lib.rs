//! # girder-core
//!
//! Core types for the Girder steel section catalogue service.
//!
//! This crate provides the pieces shared by both protocol gateways:
//!
//! - **Section Model**: the [`Beam`](section::Beam) record and seed catalogue
//! - **Catalogue Store**: the in-memory, process-lifetime [`Catalog`](catalog::Catalog)
//! - **Error Types**: shared error definitions and result types
//! - **Observability**: logging initialization helpers
//!
//! ## Crate Boundary
//!
//! `girder-core` holds no protocol knowledge. HTTP and gRPC concerns live in
//! `girder-api`; the wire contract lives in `girder-proto`.
//!
//! ## Example
//!
//! ```rust
//! use girder_core::prelude::*;
//!
//! let catalog = Catalog::with_standard_sections();
//! assert_eq!(catalog.len().unwrap(), 2);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod error;
pub mod observability;
pub mod section;

pub use error::{Error, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::error::{Error, Result};
    pub use crate::section::Beam;
}
