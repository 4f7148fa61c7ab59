//! The API gateway: the one choke point every REST call goes through.
//!
//! For each call the gateway
//! - resolves the path against the configured base URL,
//! - attaches `Authorization: Bearer <token>` when a session token is stored,
//! - bounds the exchange by a timeout,
//! - returns 2xx responses untouched and classifies everything else into an
//!   [`ApiError`], clearing the session when the server reports it expired.
//!
//! No retries happen here.

use std::sync::Arc;
use std::time::Duration;

use bazaar_domain::{
    ApiError, ApiErrorKind, ApiResponse, AppConfig, DomainError, HttpMethod, RequestDescriptor,
    SessionKey,
};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::classify::{AuthExemptions, CallContext, Failure, classify};
use crate::ports::{HttpTransport, PreparedRequest, SessionStore, TransportError};

/// Gateway settings, fixed for the lifetime of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Origin all request paths are resolved against.
    pub base_url: Url,
    /// Default timeout for every request.
    pub timeout: Duration,
    /// Log method, path, token presence and status of every exchange.
    pub log_traffic: bool,
    /// Requests whose 401 is not a session expiry.
    pub exemptions: AuthExemptions,
}

impl GatewayConfig {
    /// Creates a config with the default timeout and exemptions.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_millis(bazaar_domain::config::DEFAULT_REQUEST_TIMEOUT_MS),
            log_traffic: true,
            exemptions: AuthExemptions::default(),
        }
    }

    /// Derives the gateway settings from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] when the API URL is unusable.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DomainError> {
        Ok(Self {
            base_url: config.base_url()?,
            timeout: config.request_timeout(),
            log_traffic: config.log_traffic(),
            exemptions: AuthExemptions::default(),
        })
    }

    /// Overrides the default timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the 401 exemptions.
    #[must_use]
    pub fn with_exemptions(mut self, exemptions: AuthExemptions) -> Self {
        self.exemptions = exemptions;
        self
    }

    /// Enables or disables traffic logging.
    #[must_use]
    pub const fn with_traffic_logging(mut self, enabled: bool) -> Self {
        self.log_traffic = enabled;
        self
    }
}

/// HTTP client gateway over a transport and a session store.
pub struct ApiGateway<T, S> {
    transport: T,
    store: Arc<S>,
    config: GatewayConfig,
}

impl<T, S> std::fmt::Debug for ApiGateway<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport, S: SessionStore> ApiGateway<T, S> {
    /// Creates a gateway.
    pub const fn new(transport: T, store: Arc<S>, config: GatewayConfig) -> Self {
        Self {
            transport,
            store,
            config,
        }
    }

    /// The gateway settings.
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The session store the gateway reads tokens from.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Sends a request from an ordinary (non-login) screen.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for any non-2xx outcome.
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<ApiResponse, ApiError> {
        self.send_with(descriptor, CallContext::default()).await
    }

    /// Sends a request with explicit caller context.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for any non-2xx outcome. An
    /// [`ApiErrorKind::AuthExpired`] error means the session store has
    /// already been cleared.
    pub async fn send_with(
        &self,
        descriptor: &RequestDescriptor,
        context: CallContext,
    ) -> Result<ApiResponse, ApiError> {
        descriptor
            .validate()
            .map_err(|e| ApiError::new(ApiErrorKind::Unknown, e.to_string()))?;
        let url = self
            .resolve(&descriptor.path)
            .map_err(|e| ApiError::new(ApiErrorKind::Unknown, e.to_string()))?;

        let token = self.current_token().await;
        let request = self.prepare(descriptor, url, token.as_deref());

        if self.config.log_traffic {
            debug!(
                method = %descriptor.method,
                path = %descriptor.path,
                has_token = token.is_some(),
                "API request"
            );
        }

        let timeout = request.timeout;
        let timeout_ms = request.timeout_ms();
        let outcome = tokio::time::timeout(timeout, self.transport.execute(request))
            .await
            .unwrap_or(Err(TransportError::Timeout { timeout_ms }));

        match outcome {
            Ok(response) if response.status.is_success() => {
                if self.config.log_traffic {
                    debug!(
                        path = %descriptor.path,
                        status = response.status.as_u16(),
                        "API response success"
                    );
                }
                Ok(response)
            }
            Ok(response) => Err(self
                .fail(Failure::Response(&response), &descriptor.path, &context)
                .await),
            Err(error) => Err(self
                .fail(Failure::Transport(&error), &descriptor.path, &context)
                .await),
        }
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::send`].
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(&RequestDescriptor::get(path)).await
    }

    /// POST a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::send`].
    pub async fn post_json(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(&RequestDescriptor::new(HttpMethod::Post, path).with_json(body))
            .await
    }

    /// PUT a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::send`].
    pub async fn put_json(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.send(&RequestDescriptor::new(HttpMethod::Put, path).with_json(body))
            .await
    }

    /// PATCH `path`, optionally with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::send`].
    pub async fn patch(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, ApiError> {
        let descriptor = RequestDescriptor::new(HttpMethod::Patch, path);
        let descriptor = match body {
            Some(body) => descriptor.with_json(body),
            None => descriptor,
        };
        self.send(&descriptor).await
    }

    /// DELETE `path`.
    ///
    /// # Errors
    ///
    /// See [`ApiGateway::send`].
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(&RequestDescriptor::new(HttpMethod::Delete, path))
            .await
    }

    /// Joins `path` onto the base URL, keeping any path prefix of the base.
    fn resolve(&self, path: &str) -> Result<Url, DomainError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{}", path.trim().trim_start_matches('/'));
        Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))
    }

    /// Reads the stored token. A store failure or an empty value reads as
    /// "no token".
    async fn current_token(&self) -> Option<String> {
        match self.store.get(SessionKey::ACCESS_TOKEN).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "could not read session token");
                None
            }
        }
    }

    fn prepare(
        &self,
        descriptor: &RequestDescriptor,
        url: Url,
        token: Option<&str>,
    ) -> PreparedRequest {
        let mut headers: Vec<(String, String)> = descriptor
            .headers
            .iter()
            .filter(|(name, _)| token.is_none() || !name.eq_ignore_ascii_case("authorization"))
            .cloned()
            .collect();

        if let Some(content_type) = descriptor.content_type()
            && descriptor.header("content-type").is_none()
        {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        PreparedRequest {
            method: descriptor.method,
            url,
            headers,
            body: descriptor.body.clone(),
            timeout: descriptor.timeout.unwrap_or(self.config.timeout),
        }
    }

    async fn fail(&self, failure: Failure<'_>, path: &str, context: &CallContext) -> ApiError {
        let classification = classify(failure, path, &self.config.exemptions, context);
        let error = classification.error;

        if self.config.log_traffic {
            warn!(
                path = %path,
                status = error.status().map(|s| s.as_u16()),
                kind = %error.kind(),
                "API response error"
            );
        }

        if classification.clear_session
            && let Err(e) = self.store.clear().await
        {
            warn!(error = %e, "could not clear expired session");
        }

        error
    }
}
