//! Error types for the post API client.
//!
//! # Design
//! Screens only ever need to know *which* operation failed, never why, so
//! `ClientError` carries no payload. Transport exceptions, non-2xx statuses
//! and malformed bodies all collapse into the same variant for an operation;
//! the diagnostic detail is logged where the fold happens.

use thiserror::Error;

/// The uniform failure signal for one client operation.
///
/// The `Display` text is the short message surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClientError {
    /// `list` or `get` did not produce data.
    #[error("fetch failed")]
    FetchFailed,

    /// `create` was not confirmed by the server.
    #[error("save failed")]
    SaveFailed,

    /// `update` was not confirmed by the server.
    #[error("update failed")]
    UpdateFailed,

    /// `delete` was not confirmed by the server.
    #[error("delete failed")]
    DeleteFailed,
}

/// A failure while performing the HTTP round-trip itself (connection refused,
/// unreadable body, timeout). Produced by `Transport` implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport error: {0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Rejected startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("resource base path is empty")]
    Empty,

    #[error("invalid resource base url {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme {0:?} in resource base url")]
    UnsupportedScheme(String),
}
