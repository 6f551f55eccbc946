//! Error types and result aliases for Girder.
//!
//! Errors are structured for programmatic handling: the gateways map each
//! variant onto an HTTP status or an RPC negative-result flag.

/// The result type used throughout Girder.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Girder operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested catalogue entry was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The outbound stock lookup failed (unreachable endpoint, non-success
    /// status, or undecodable response). Reported once, never retried.
    #[error("stock lookup failed: {message}")]
    Lookup {
        /// Description of the lookup failure.
        message: String,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// An internal error occurred that should not happen in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl Error {
    /// Creates a new lookup error with the given message.
    #[must_use]
    pub fn lookup(message: impl Into<String>) -> Self {
        Self::Lookup {
            message: message.into(),
        }
    }

    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
