//! Inbound response types
//!
//! The gateway hands successful responses back exactly as received; the
//! helpers here only interpret the bytes on demand.

mod status;

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use status::StatusCode;

/// A response as received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers, names lower-cased.
    pub headers: HashMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
        }
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body into a JSON value.
    ///
    /// An empty body is `null`; a body that is not JSON becomes a JSON
    /// string holding the text.
    #[must_use]
    pub fn data(&self) -> Value {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Value::Null;
        }
        serde_json::from_slice(&self.body).unwrap_or_else(|_| Value::String(self.text()))
    }

    /// Deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns the server-supplied `message` field of a JSON object body.
    ///
    /// A non-empty string is used as-is; a non-zero number or `true` is
    /// rendered as text. Empty, `false`, zero, `null` and nested values
    /// count as absent.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let Value::Object(map) = self.data() else {
            return None;
        };
        match map.get("message")? {
            Value::String(message) if !message.is_empty() => Some(message.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}
