//! Service ads API.
//!
//! Thin typed wrapper over the gateway for the `/api/v1/ads` endpoints.
//! Ads that come back without images get the placeholder image so callers
//! can always render one.

use std::sync::Arc;

use bazaar_domain::{
    Ad, AdImage, ApiError, ApiErrorKind, ApiResponse, FormPart, HttpMethod, RequestDescriptor,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::gateway::ApiGateway;
use crate::ports::{HttpTransport, SessionStore};

const ADS_PATH: &str = "/api/v1/ads";

/// Client for the ads endpoints.
pub struct AdService<T, S> {
    gateway: Arc<ApiGateway<T, S>>,
}

impl<T, S> Clone for AdService<T, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<T: HttpTransport, S: SessionStore> AdService<T, S> {
    /// Creates the service over a shared gateway.
    pub const fn new(gateway: Arc<ApiGateway<T, S>>) -> Self {
        Self { gateway }
    }

    /// All ads.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, or `Unknown` when the body is not a list
    /// of ads.
    pub async fn list_ads(&self) -> Result<Vec<Ad>, ApiError> {
        let response = self.gateway.get(ADS_PATH).await?;
        Ok(with_placeholders(decode_list(&response)?))
    }

    /// Ads owned by one user.
    ///
    /// # Errors
    ///
    /// See [`AdService::list_ads`].
    pub async fn ads_by_user(&self, user_id: &str) -> Result<Vec<Ad>, ApiError> {
        let response = self
            .gateway
            .get(&format!("{ADS_PATH}/user/{user_id}"))
            .await?;
        Ok(with_placeholders(decode_list(&response)?))
    }

    /// One ad.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids, or any other gateway error.
    pub async fn ad_by_id(&self, ad_id: &str) -> Result<Ad, ApiError> {
        let response = self.gateway.get(&format!("{ADS_PATH}/{ad_id}")).await?;
        decode(&response)
    }

    /// Images of one ad.
    ///
    /// Never fails: an empty list or any error yields the fallback image.
    pub async fn ad_images(&self, ad_id: &str) -> Vec<AdImage> {
        let images = self
            .gateway
            .get(&format!("{ADS_PATH}/{ad_id}/images"))
            .await
            .and_then(|response| decode_list::<AdImage>(&response));

        match images {
            Ok(images) if !images.is_empty() => images,
            Ok(_) => vec![AdImage::fallback(ad_id)],
            Err(e) => {
                warn!(
                    ad_id,
                    status = e.status().map(|s| s.as_u16()),
                    kind = %e.kind(),
                    "failed to load ad images"
                );
                vec![AdImage::fallback(ad_id)]
            }
        }
    }

    /// Creates an ad from a multipart form.
    ///
    /// # Errors
    ///
    /// Returns the gateway error or a decode failure.
    pub async fn create_ad(&self, form: Vec<FormPart>) -> Result<Ad, ApiError> {
        let descriptor = RequestDescriptor::new(HttpMethod::Post, format!("{ADS_PATH}/create"))
            .with_multipart(form);
        let response = self.gateway.send(&descriptor).await?;
        decode(&response)
    }

    /// Replaces an ad from a multipart form.
    ///
    /// # Errors
    ///
    /// Returns the gateway error or a decode failure.
    pub async fn update_ad(&self, ad_id: &str, form: Vec<FormPart>) -> Result<Ad, ApiError> {
        let descriptor =
            RequestDescriptor::new(HttpMethod::Put, format!("{ADS_PATH}/update/{ad_id}"))
                .with_multipart(form);
        let response = self.gateway.send(&descriptor).await?;
        decode(&response)
    }

    /// Deletes an ad.
    ///
    /// # Errors
    ///
    /// Returns the gateway error.
    pub async fn delete_ad(&self, ad_id: &str) -> Result<(), ApiError> {
        self.gateway.delete(&format!("{ADS_PATH}/{ad_id}")).await?;
        Ok(())
    }

    /// Flips an ad between active and inactive.
    ///
    /// # Errors
    ///
    /// Returns the gateway error or a decode failure.
    pub async fn toggle_ad_status(&self, ad_id: &str) -> Result<Ad, ApiError> {
        let response = self
            .gateway
            .patch(&format!("{ADS_PATH}/{ad_id}/toggle-status"), None)
            .await?;
        decode(&response)
    }
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D, ApiError> {
    response.json().map_err(|e| {
        ApiError::new(
            ApiErrorKind::Unknown,
            format!("Unexpected response from server: {e}"),
        )
        .with_status(response.status)
    })
}

/// A `null` or empty body is an empty list.
fn decode_list<D: DeserializeOwned>(response: &ApiResponse) -> Result<Vec<D>, ApiError> {
    match response.data() {
        Value::Null => Ok(Vec::new()),
        _ => decode(response),
    }
}

fn with_placeholders(ads: Vec<Ad>) -> Vec<Ad> {
    ads.into_iter().map(Ad::with_placeholder_image).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gateway::GatewayConfig;
    use crate::ports::{PreparedRequest, TransportError};
    use crate::MemorySessionStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use url::Url;

    /// Answers by `METHOD path`, 404 for anything unrouted.
    #[derive(Default)]
    struct RoutedTransport {
        routes: HashMap<String, (u16, String)>,
        seen: Mutex<Vec<PreparedRequest>>,
    }

    impl RoutedTransport {
        fn route(mut self, key: &str, status: u16, body: &str) -> Self {
            self.routes
                .insert(key.to_string(), (status, body.to_string()));
            self
        }
    }

    #[async_trait]
    impl HttpTransport for RoutedTransport {
        async fn execute(&self, request: PreparedRequest) -> Result<ApiResponse, TransportError> {
            let key = format!("{} {}", request.method, request.url.path());
            self.seen.lock().unwrap().push(request);
            let (status, body) = self
                .routes
                .get(&key)
                .cloned()
                .unwrap_or((404, String::new()));
            Ok(ApiResponse::new(status, HashMap::new(), body.into_bytes()))
        }
    }

    fn service(transport: RoutedTransport) -> AdService<RoutedTransport, MemorySessionStore> {
        let gateway = ApiGateway::new(
            transport,
            Arc::new(MemorySessionStore::with_entries([("accessToken", "tok")])),
            GatewayConfig::new(Url::parse("http://api.test").unwrap()),
        );
        AdService::new(Arc::new(gateway))
    }

    #[tokio::test]
    async fn list_fills_missing_images() {
        let ads = service(RoutedTransport::default().route(
            "GET /api/v1/ads",
            200,
            r#"[{"id":"a1","images":[]},{"id":"a2","images":[{"id":"i","url":"/i.png","name":"i.png"}]}]"#,
        ))
        .list_ads()
        .await
        .unwrap();

        assert_eq!(ads[0].images, vec![AdImage::placeholder("a1")]);
        assert_eq!(ads[0].images[0].name, "default-ad.png");
        assert_eq!(ads[1].images[0].url, "/i.png");
    }

    #[tokio::test]
    async fn null_list_is_empty() {
        let ads = service(RoutedTransport::default().route("GET /api/v1/ads/user/u-1", 200, "null"))
            .ads_by_user("u-1")
            .await
            .unwrap();
        assert!(ads.is_empty());
    }

    #[tokio::test]
    async fn missing_ad_is_not_found() {
        let err = service(RoutedTransport::default().route(
            "GET /api/v1/ads/nope",
            404,
            r#"{"message":"İlan bulunamadı."}"#,
        ))
        .ad_by_id("nope")
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::NotFound);
        assert_eq!(err.message(), "İlan bulunamadı.");
    }

    #[tokio::test]
    async fn malformed_body_is_unknown_error() {
        let err = service(RoutedTransport::default().route("GET /api/v1/ads/a1", 200, "[1,2]"))
            .ad_by_id("a1")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ApiErrorKind::Unknown);
        assert!(err.message().starts_with("Unexpected response from server"));
    }

    #[tokio::test]
    async fn images_fall_back_to_placeholder() {
        let empty = service(RoutedTransport::default().route("GET /api/v1/ads/a1/images", 200, "[]"))
            .ad_images("a1")
            .await;
        assert_eq!(empty, vec![AdImage::fallback("a1")]);
        assert_eq!(empty[0].name, "default.png");

        let failing = service(RoutedTransport::default().route("GET /api/v1/ads/a1/images", 500, ""))
            .ad_images("a1")
            .await;
        assert_eq!(failing, vec![AdImage::fallback("a1")]);
    }

    #[tokio::test]
    async fn create_sends_multipart() {
        let transport =
            RoutedTransport::default().route("POST /api/v1/ads/create", 201, r#"{"id":"new"}"#);
        let svc = service(transport);
        let ad = svc
            .create_ad(vec![FormPart::text("title", "Temizlik")])
            .await
            .unwrap();
        assert_eq!(ad.id, "new");

        let seen = svc.gateway.transport_requests();
        assert!(matches!(seen[0].body, bazaar_domain::RequestBody::Multipart(_)));
        assert_eq!(seen[0].header("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn toggle_and_delete_hit_expected_routes() {
        let svc = service(
            RoutedTransport::default()
                .route(
                    "PATCH /api/v1/ads/a1/toggle-status",
                    200,
                    r#"{"id":"a1","isActive":false}"#,
                )
                .route("DELETE /api/v1/ads/a1", 204, ""),
        );

        let toggled = svc.toggle_ad_status("a1").await.unwrap();
        assert!(!toggled.is_active);
        svc.delete_ad("a1").await.unwrap();
    }

    impl ApiGateway<RoutedTransport, MemorySessionStore> {
        fn transport_requests(&self) -> Vec<PreparedRequest> {
            self.transport().seen.lock().unwrap().clone()
        }
    }
}
