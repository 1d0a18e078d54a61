//! Error types for the users API client and service.
//!
//! # Design
//! Failures are layered in two tiers. `ClientError` is produced only by the
//! interceptor's normalization step and always carries an HTTP-like status.
//! `ServiceError` wraps a `ClientError` for callers of `UsersService`, keeping
//! the original as its source. `TransportError` is the raw, pre-normalization
//! failure reported by a `Transport` and never escapes the client.

use thiserror::Error;

pub const UPSTREAM_ERROR: &str = "Upstream Error";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Transport-tier failure: an HTTP-like status plus a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status_code} {message}")]
pub struct ClientError {
    pub message: String,
    pub status_code: u16,
}

impl ClientError {
    pub fn new(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }

    /// No response was received from the upstream.
    pub fn upstream() -> Self {
        Self::new(UPSTREAM_ERROR, 502)
    }

    /// Neither a response nor a recognizable request failure.
    pub fn internal() -> Self {
        Self::new(INTERNAL_SERVER_ERROR, 500)
    }
}

/// Service-tier failure wrapping the `ClientError` that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("UsersServiceError: {source}")]
pub struct ServiceError {
    #[source]
    pub source: ClientError,
}

impl ServiceError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ClientError> for ServiceError {
    fn from(source: ClientError) -> Self {
        Self { source }
    }
}

/// Raw failure reported by a `Transport` before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request went out but no response came back (connect failure,
    /// timeout, dropped connection).
    #[error("no response received: {0}")]
    NoResponse(String),

    /// The request could not be constructed or sent at all.
    #[error("request failed: {0}")]
    Request(String),
}
