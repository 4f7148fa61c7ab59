//! Request payloads

use serde_json::Value;

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file upload.
    File {
        /// Field name.
        name: String,
        /// File name reported to the server.
        file_name: String,
        /// File contents.
        bytes: Vec<u8>,
        /// Explicit content type. Guessed from `file_name` when absent.
        content_type: Option<String>,
    },
}

impl FormPart {
    /// Creates a text field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a file field with a content type derived from the file name.
    #[must_use]
    pub fn file(name: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::File {
            name: name.into(),
            file_name: file_name.into(),
            bytes,
            content_type: None,
        }
    }

    /// Returns the form field name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }

    /// Returns the MIME type a file part will be sent with.
    ///
    /// Text parts have no content type of their own.
    #[must_use]
    pub fn mime_type(&self) -> Option<String> {
        match self {
            Self::Text { .. } => None,
            Self::File {
                content_type: Some(ct),
                ..
            } => Some(ct.clone()),
            Self::File { file_name, .. } => Some(
                mime_guess::from_path(file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string(),
            ),
        }
    }
}

/// The payload of an outbound request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No payload.
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
    /// A multipart form, used by file-bearing endpoints.
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Returns the content type the request must declare.
    ///
    /// Multipart bodies return `None`: the boundary is only known once the
    /// transport encodes the form.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Json(_) => Some("application/json"),
            Self::Empty | Self::Multipart(_) => None,
        }
    }
}
