//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port. Every HTTP status comes
//! back as a response; only exchanges that produced no response become
//! `TransportError`s.

use std::collections::HashMap;

use async_trait::async_trait;
use bazaar_application::ports::{HttpTransport, PreparedRequest, TransportError};
use bazaar_domain::{ApiResponse, FormPart, HttpMethod, RequestBody};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method};

const MAX_REDIRECTS: usize = 10;

/// HTTP transport backed by `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// - User-Agent: `Bazaar/<version>`
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("Bazaar/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport over a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Encodes multipart fields. File parts carry their file name and MIME type.
    fn build_form(parts: &[FormPart]) -> Result<Form, TransportError> {
        parts.iter().try_fold(Form::new(), |form, part| match part {
            FormPart::Text { name, value } => Ok(form.text(name.clone(), value.clone())),
            FormPart::File {
                name,
                file_name,
                bytes,
                ..
            } => {
                let mime = part
                    .mime_type()
                    .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());
                let file = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(&mime)
                    .map_err(|e| TransportError::InvalidRequest(format!("{name}: {e}")))?;
                Ok(form.part(name.clone(), file))
            }
        })
    }

    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout { timeout_ms };
        }
        if error.is_builder() {
            return TransportError::InvalidRequest(error.to_string());
        }
        if error.is_connect() || error.is_request() {
            return TransportError::Connection(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, TransportError> {
        let timeout_ms = request.timeout_ms();
        let multipart = matches!(request.body, RequestBody::Multipart(_));

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone())
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            // The multipart encoder owns Content-Type, boundary included.
            if multipart && name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            builder = builder.header(name, value);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| match Self::map_error(&e, timeout_ms) {
                timeout @ TransportError::Timeout { .. } => timeout,
                _ => TransportError::Other(format!("failed to read body: {e}")),
            })?
            .to_vec();

        Ok(ApiResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestTransport::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_form_with_file_and_text() {
        let parts = vec![
            FormPart::text("title", "Nakliyat"),
            FormPart::file("images", "truck.jpg", vec![0xFF, 0xD8]),
        ];
        assert!(ReqwestTransport::build_form(&parts).is_ok());
    }

    #[test]
    fn test_form_rejects_bad_mime() {
        let parts = vec![FormPart::File {
            name: "images".into(),
            file_name: "x.bin".into(),
            bytes: vec![],
            content_type: Some("not a mime type".into()),
        }];
        assert!(matches!(
            ReqwestTransport::build_form(&parts),
            Err(TransportError::InvalidRequest(_))
        ));
    }
}
