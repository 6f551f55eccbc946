//! # girder-proto
//!
//! Protobuf definitions and generated code for Girder.
//!
//! This crate provides the cross-language contract used by the gRPC gateway
//! and by backend consumers of the catalogue (e.g. calculation engines).
//!
//! ## Proto File Organization
//!
//! ```text
//! proto/girder/v1/
//! └── catalog.proto     - Catalogue service + beam messages
//! ```
//!
//! ## Wire Format Guarantees
//!
//! - All messages follow Protobuf evolution rules
//! - Field numbers are never reused
//! - The `Beam` message maps field-for-field, by name, onto the REST JSON shape
//!
//! ## Example
//!
//! ```rust,ignore
//! use girder_proto::v1::{GetBeamRequest};
//!
//! let request = GetBeamRequest {
//!     section_designation: "UB406x178x74".to_string(),
//! };
//! ```

#![deny(rust_2018_idioms)]
// Allow generated code patterns
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::default_trait_access)]

/// Version 1 of the Girder protocol.
pub mod v1 {
    #![allow(missing_docs)]

    tonic::include_proto!("girder.v1");
}
