//! Failure classification
//!
//! Turns a transport error or a non-2xx response into exactly one
//! [`ApiError`]. The function is pure: the only side effect it can ask for
//! is a session clear, reported through [`Classification::clear_session`].

use bazaar_domain::api_error::{
    AUTH_EXPIRED_MESSAGE, FORBIDDEN_MESSAGE, NETWORK_MESSAGE, NOT_FOUND_MESSAGE, SERVER_MESSAGE,
    TIMEOUT_MESSAGE,
};
use bazaar_domain::{ApiError, ApiErrorKind, ApiResponse, StatusCode};

use crate::ports::TransportError;

/// Path fragment of the authenticate endpoint.
pub const DEFAULT_LOGIN_MARKER: &str = "/auth/authenticate";

/// Path fragment of the login screen.
pub const LOGIN_SCREEN_MARKER: &str = "/login";

/// What went wrong with one call.
#[derive(Debug, Clone, Copy)]
pub enum Failure<'a> {
    /// No response was received.
    Transport(&'a TransportError),
    /// The server answered with a non-2xx status.
    Response(&'a ApiResponse),
}

/// Requests whose 401 must not be read as session expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthExemptions {
    login_markers: Vec<String>,
}

impl AuthExemptions {
    /// Exempts requests whose path contains any of `markers`.
    #[must_use]
    pub fn new<I, M>(markers: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            login_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when `path` targets a login endpoint.
    #[must_use]
    pub fn is_login_request(&self, path: &str) -> bool {
        self.login_markers
            .iter()
            .any(|marker| !marker.is_empty() && path.contains(marker.as_str()))
    }
}

impl Default for AuthExemptions {
    fn default() -> Self {
        Self::new([DEFAULT_LOGIN_MARKER])
    }
}

/// Caller-side facts the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallContext {
    /// The caller is the login screen; a 401 is its own business.
    pub on_login_screen: bool,
}

impl CallContext {
    /// Context for a call made from the login screen.
    #[must_use]
    pub const fn login_screen() -> Self {
        Self {
            on_login_screen: true,
        }
    }

    /// Derives the context from the caller's current navigation location.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        Self {
            on_login_screen: location.contains(LOGIN_SCREEN_MARKER),
        }
    }
}

/// Result of classifying one failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// The error to hand back to the caller.
    pub error: ApiError,
    /// Whether persisted session state must be cleared first.
    pub clear_session: bool,
}

impl Classification {
    const fn plain(error: ApiError) -> Self {
        Self {
            error,
            clear_session: false,
        }
    }
}

/// Classifies a failed call.
///
/// Precedence: timeout, 401 (unless exempt), 403, 404, 5xx, no response,
/// server-supplied message, fallback. An exempt 401 skips the expiry branch
/// and lands on one of the last two with its payload intact.
#[must_use]
pub fn classify(
    failure: Failure<'_>,
    path: &str,
    exemptions: &AuthExemptions,
    context: &CallContext,
) -> Classification {
    match failure {
        Failure::Transport(error) => classify_transport(error),
        Failure::Response(response) => classify_response(response, path, exemptions, context),
    }
}

fn classify_transport(error: &TransportError) -> Classification {
    let (kind, message) = match error {
        TransportError::Timeout { .. } => (ApiErrorKind::Timeout, TIMEOUT_MESSAGE.to_string()),
        TransportError::Connection(_) => (ApiErrorKind::Network, NETWORK_MESSAGE.to_string()),
        TransportError::InvalidRequest(_) | TransportError::Other(_) => {
            (ApiErrorKind::Unknown, error.to_string())
        }
    };
    Classification::plain(ApiError::new(kind, message))
}

fn classify_response(
    response: &ApiResponse,
    path: &str,
    exemptions: &AuthExemptions,
    context: &CallContext,
) -> Classification {
    let status = response.status;
    let server_message = response.server_message();
    let with_details =
        |error: ApiError| error.with_status(status).with_payload(response.data());

    if status == StatusCode::UNAUTHORIZED
        && !context.on_login_screen
        && !exemptions.is_login_request(path)
    {
        return Classification {
            error: with_details(ApiError::new(ApiErrorKind::AuthExpired, AUTH_EXPIRED_MESSAGE)),
            clear_session: true,
        };
    }

    let (kind, message) = if status == StatusCode::FORBIDDEN {
        (
            ApiErrorKind::Forbidden,
            server_message.unwrap_or_else(|| FORBIDDEN_MESSAGE.to_string()),
        )
    } else if status == StatusCode::NOT_FOUND {
        (
            ApiErrorKind::NotFound,
            server_message.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        )
    } else if status.is_server_error() {
        (
            ApiErrorKind::Server,
            server_message.unwrap_or_else(|| SERVER_MESSAGE.to_string()),
        )
    } else if let Some(message) = server_message {
        (ApiErrorKind::Remote, message)
    } else {
        (
            ApiErrorKind::Unknown,
            format!("Request failed with status code {}", status.as_u16()),
        )
    };

    Classification::plain(with_details(ApiError::new(kind, message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    fn run(resp: &ApiResponse, path: &str, context: CallContext) -> Classification {
        classify(
            Failure::Response(resp),
            path,
            &AuthExemptions::default(),
            &context,
        )
    }

    #[test]
    fn timeout_uses_fixed_message() {
        let err = TransportError::Timeout { timeout_ms: 30_000 };
        let result = classify(
            Failure::Transport(&err),
            "/api/v1/ads",
            &AuthExemptions::default(),
            &CallContext::default(),
        );
        assert_eq!(result.error.kind(), ApiErrorKind::Timeout);
        assert_eq!(result.error.message(), "Request timeout. Please try again.");
        assert!(!result.clear_session);
    }

    #[test]
    fn connection_failure_is_network_error() {
        let err = TransportError::Connection("connection refused".into());
        let result = classify(
            Failure::Transport(&err),
            "/api/v1/ads",
            &AuthExemptions::default(),
            &CallContext::default(),
        );
        assert_eq!(result.error.kind(), ApiErrorKind::Network);
        assert_eq!(
            result.error.message(),
            "Network error. Please check your internet connection."
        );
    }

    #[test]
    fn other_transport_failure_keeps_raw_message() {
        let err = TransportError::Other("body stream closed".into());
        let result = classify(
            Failure::Transport(&err),
            "/x",
            &AuthExemptions::default(),
            &CallContext::default(),
        );
        assert_eq!(result.error.kind(), ApiErrorKind::Unknown);
        assert_eq!(result.error.message(), "body stream closed");
    }

    #[test]
    fn unauthorized_expires_session() {
        let resp = response(401, r#"{"message":"jwt expired"}"#);
        let result = run(&resp, "/api/v1/ads/user/7", CallContext::default());

        assert!(result.clear_session);
        assert_eq!(result.error.kind(), ApiErrorKind::AuthExpired);
        assert_eq!(result.error.message(), "Session expired. Please log in again.");
    }

    #[test]
    fn unauthorized_login_request_is_passed_through() {
        let resp = response(401, r#"{"message":"Invalid credentials"}"#);
        let result = run(&resp, "/api/v1/auth/authenticate", CallContext::default());

        assert!(!result.clear_session);
        assert_eq!(result.error.kind(), ApiErrorKind::Remote);
        assert_eq!(result.error.message(), "Invalid credentials");
        assert_eq!(result.error.status(), Some(StatusCode(401)));
        assert_eq!(
            result.error.payload(),
            Some(&json!({"message": "Invalid credentials"}))
        );
    }

    #[test]
    fn unauthorized_on_login_screen_is_passed_through() {
        let resp = response(401, "");
        let result = run(&resp, "/api/v1/users/me", CallContext::from_location("/login"));

        assert!(!result.clear_session);
        assert_eq!(result.error.kind(), ApiErrorKind::Unknown);
        assert_eq!(result.error.message(), "Request failed with status code 401");
    }

    #[test]
    fn either_exemption_suffices() {
        let resp = response(401, "");
        let both = run(&resp, "/auth/authenticate", CallContext::login_screen());
        assert!(!both.clear_session);

        let custom = AuthExemptions::new(["/auth/authenticate", "/auth/refresh"]);
        let result = classify(
            Failure::Response(&resp),
            "/api/v1/auth/refresh",
            &custom,
            &CallContext::default(),
        );
        assert!(!result.clear_session);
    }

    #[test]
    fn forbidden_prefers_server_message() {
        let with_message = run(&response(403, r#"{"message":"X"}"#), "/a", CallContext::default());
        assert_eq!(with_message.error.kind(), ApiErrorKind::Forbidden);
        assert_eq!(with_message.error.message(), "X");

        let without = run(&response(403, ""), "/a", CallContext::default());
        assert_eq!(without.error.message(), "Access denied.");
    }

    #[test]
    fn not_found_prefers_server_message() {
        let with_message = run(
            &response(404, r#"{"message":"İlan bulunamadı."}"#),
            "/api/v1/ads/9",
            CallContext::default(),
        );
        assert_eq!(with_message.error.kind(), ApiErrorKind::NotFound);
        assert_eq!(with_message.error.message(), "İlan bulunamadı.");

        let without = run(&response(404, "<html>"), "/a", CallContext::default());
        assert_eq!(without.error.message(), "Resource not found.");
    }

    #[test]
    fn server_errors_cover_all_5xx() {
        for status in [500, 502, 503, 504, 599] {
            let result = run(&response(status, ""), "/a", CallContext::default());
            assert_eq!(result.error.kind(), ApiErrorKind::Server, "status {status}");
            assert_eq!(result.error.message(), "Server error. Please try again later.");
        }
    }

    #[test]
    fn other_statuses_use_server_message_or_fallback() {
        let remote = run(
            &response(422, r#"{"message":"Title is required"}"#),
            "/api/v1/ads/create",
            CallContext::default(),
        );
        assert_eq!(remote.error.kind(), ApiErrorKind::Remote);
        assert_eq!(remote.error.message(), "Title is required");

        let unknown = run(&response(409, "{}"), "/a", CallContext::default());
        assert_eq!(unknown.error.kind(), ApiErrorKind::Unknown);
        assert_eq!(unknown.error.message(), "Request failed with status code 409");
    }

    #[test]
    fn location_context_detects_login_screen() {
        assert!(CallContext::from_location("/login?next=/ads").on_login_screen);
        assert!(!CallContext::from_location("/ads/12").on_login_screen);
    }
}
