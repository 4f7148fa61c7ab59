//! Request descriptor handed to the gateway by callers

use std::time::Duration;

use serde_json::Value;

use super::{FormPart, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Everything a caller says about one outbound call.
///
/// `path` is relative to the gateway's base URL. Headers keep insertion
/// order; the gateway adds `Authorization` and `Content-Type` on top.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path relative to the configured base URL, e.g. `/api/v1/ads`.
    pub path: String,
    /// Payload.
    pub body: RequestBody,
    /// Extra headers as name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Per-request timeout overriding the gateway default.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Creates a descriptor without body or extra headers.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Shorthand for a GET descriptor.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Attaches a JSON payload.
    #[must_use]
    pub fn with_json(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Attaches a multipart form.
    #[must_use]
    pub fn with_multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Overrides the timeout for this request only.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Checks the descriptor can be dispatched.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyPath`] for a blank path and
    /// [`DomainError::InvalidHeader`] for a header with an empty name.
    pub fn validate(&self) -> DomainResult<()> {
        if self.path.trim().is_empty() {
            return Err(DomainError::EmptyPath);
        }
        if let Some((name, _)) = self.headers.iter().find(|(n, _)| n.trim().is_empty()) {
            return Err(DomainError::InvalidHeader(format!("empty header name `{name}`")));
        }
        Ok(())
    }

    /// Content type implied by the body.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        self.body.content_type()
    }

    /// Returns the caller-supplied value of a header, if any.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn blank_path_is_rejected() {
        assert_eq!(
            RequestDescriptor::get("   ").validate(),
            Err(DomainError::EmptyPath)
        );
        assert!(RequestDescriptor::get("/api/v1/ads").validate().is_ok());
    }

    #[test]
    fn empty_header_name_is_rejected() {
        let descriptor = RequestDescriptor::get("/x").with_header("", "v");
        assert!(matches!(
            descriptor.validate(),
            Err(DomainError::InvalidHeader(_))
        ));
    }

    #[test]
    fn builders_compose() {
        let descriptor = RequestDescriptor::new(HttpMethod::Post, "/api/v1/auth/authenticate")
            .with_json(json!({"email": "a@b.c"}))
            .with_header("X-Lang", "tr")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(descriptor.content_type(), Some("application/json"));
        assert_eq!(descriptor.header("x-lang"), Some("tr"));
        assert_eq!(descriptor.timeout, Some(Duration::from_secs(5)));
    }
}
