//! HTTP transport port

use std::time::Duration;

use async_trait::async_trait;
use bazaar_domain::{ApiResponse, HttpMethod, RequestBody};
use thiserror::Error;
use url::Url;

/// A fully resolved request, ready to put on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Absolute URL.
    pub url: Url,
    /// Headers, including `Authorization` when a token was attached.
    pub headers: Vec<(String, String)>,
    /// Payload.
    pub body: RequestBody,
    /// Time budget for the whole exchange.
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Timeout in whole milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Failures where no HTTP response is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The exchange did not finish in time.
    #[error("timeout of {timeout_ms}ms exceeded")]
    Timeout {
        /// The budget that was exceeded.
        timeout_ms: u64,
    },

    /// The server could not be reached; nothing was received.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Anything else the transport reports.
    #[error("{0}")]
    Other(String),
}

/// Port for putting requests on the wire.
///
/// Implementations return `Ok` for every HTTP status, error statuses
/// included. `Err` is reserved for exchanges that produced no response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes one request.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response was received.
    async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, TransportError>;
}
