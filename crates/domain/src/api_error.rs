//! Normalized, user-presentable errors
//!
//! Every failed gateway call surfaces as exactly one [`ApiError`]. The
//! message is meant to be shown to the end user as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::response::StatusCode;

/// Message used when a request exceeds its timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";
/// Message used when the session is detected as expired.
pub const AUTH_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
/// Fallback message for 403 responses.
pub const FORBIDDEN_MESSAGE: &str = "Access denied.";
/// Fallback message for 404 responses.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
/// Fallback message for 5xx responses.
pub const SERVER_MESSAGE: &str = "Server error. Please try again later.";
/// Message used when no response was received at all.
pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";

/// The fixed set of failure reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The request did not complete within its timeout.
    Timeout,
    /// The server rejected the session token (401).
    AuthExpired,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 5xx.
    Server,
    /// No response was received.
    Network,
    /// Any other failure where the server supplied a message.
    Remote,
    /// Everything else.
    Unknown,
}

impl ApiErrorKind {
    /// Returns the taxonomy name of this kind, e.g. `TimeoutError`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Timeout => "TimeoutError",
            Self::AuthExpired => "AuthExpiredError",
            Self::Forbidden => "ForbiddenError",
            Self::NotFound => "NotFoundError",
            Self::Server => "ServerError",
            Self::Network => "NetworkError",
            Self::Remote => "RemoteError",
            Self::Unknown => "UnknownError",
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified gateway failure.
///
/// `status` and `payload` carry the server response when there was one, so
/// callers such as a login screen can inspect the original error body.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    status: Option<StatusCode>,
    payload: Option<Value>,
}

impl ApiError {
    /// Creates an error without response details.
    #[must_use]
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    /// Attaches the HTTP status of the failed response.
    #[must_use]
    pub const fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the decoded body of the failed response.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// The failure reason.
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Status of the failed response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Decoded body of the failed response, if one was received.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Returns true for [`ApiErrorKind::AuthExpired`].
    #[must_use]
    pub fn is_auth_expired(&self) -> bool {
        self.kind == ApiErrorKind::AuthExpired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn display_is_the_message() {
        let err = ApiError::new(ApiErrorKind::Forbidden, "X");
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.kind().to_string(), "ForbiddenError");
    }

    #[test]
    fn response_details_are_kept() {
        let err = ApiError::new(ApiErrorKind::Remote, "Invalid credentials")
            .with_status(StatusCode::UNAUTHORIZED)
            .with_payload(json!({"message": "Invalid credentials"}));

        assert_eq!(err.status(), Some(StatusCode(401)));
        assert_eq!(err.payload(), Some(&json!({"message": "Invalid credentials"})));
        assert!(!err.is_auth_expired());
    }
}
