//! Shop backend client implementation.
//!
//! Uses `reqwest` for HTTP. Responses are read as text first so failures
//! can be logged with a body excerpt.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use uniformes_core::{ApiEnvelope, Client, ClientId, Price, Product};

use super::ApiError;
use crate::config::{StorefrontConfig, api_origin};
use crate::stores::LineItem;

/// Body of `POST /checkout`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest<'a> {
    pub items: &'a [LineItem],
    pub total: Price,
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the shop REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    origin: String,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = config.api_url.as_str().trim_end_matches('/').to_string();
        let origin = api_origin(&base_url);

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: builder.build()?,
                base_url,
                origin,
            }),
        })
    }

    /// API base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// API origin that media paths are relative to.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.inner.origin
    }

    /// Absolute URL for a backend media path.
    #[must_use]
    pub fn media_url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.origin)
    }

    /// Build an endpoint URL under the API base.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{path}", self.inner.base_url))?)
    }

    /// Fetch all client organizations.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or malformed JSON.
    #[instrument(skip(self))]
    pub async fn list_clients(&self) -> Result<ApiEnvelope<Vec<Client>>, ApiError> {
        let url = self.endpoint("/shop/clients")?;
        self.get_json(url).await
    }

    /// Fetch the products offered to one client.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or malformed JSON.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        client_id: ClientId,
    ) -> Result<ApiEnvelope<Vec<Product>>, ApiError> {
        let mut url = self.endpoint("/shop/products")?;
        url.query_pairs_mut()
            .append_pair("client_id", &client_id.to_string());
        self.get_json(url).await
    }

    /// Submit a checkout and return the backend's response payload.
    ///
    /// An empty response body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or malformed JSON.
    #[instrument(skip(self, request), fields(items = request.items.len(), total = %request.total))]
    pub async fn checkout(
        &self,
        request: &CheckoutRequest<'_>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint("/checkout")?;
        let response = self.inner.client.post(url).json(request).send().await?;
        let body = read_body(response).await?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        parse_body(&body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self
            .inner
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;
        let body = read_body(response).await?;
        parse_body(&body)
    }
}

/// Read a response body, failing on non-success status codes.
async fn read_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();

    // Get response body as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %excerpt(&body),
            "Shop API returned non-success status"
        );
        return Err(ApiError::Status(status));
    }

    Ok(body)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %excerpt(body),
            "Failed to parse shop API response"
        );
        ApiError::Parse(e)
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(500).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client_for(api_url: &str) -> ApiClient {
        let config = StorefrontConfig::default().with_api_url(api_url).unwrap();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_api_segment() {
        let client = client_for("http://localhost:8000/api");
        assert_eq!(
            client.endpoint("/shop/clients").unwrap().as_str(),
            "http://localhost:8000/api/shop/clients"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = client_for("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(
            client.endpoint("/checkout").unwrap().as_str(),
            "http://localhost:8000/api/checkout"
        );
    }

    #[test]
    fn test_media_url_uses_origin() {
        let client = client_for("https://uniformes.example.com/api");
        assert_eq!(client.origin(), "https://uniformes.example.com");
        assert_eq!(
            client.media_url("/storage/products/1.jpg"),
            "https://uniformes.example.com/storage/products/1.jpg"
        );
    }

    #[test]
    fn test_checkout_request_shape() {
        let request = CheckoutRequest {
            items: &[],
            total: Price::ZERO,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"items": [], "total": 0.0}));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(1000);
        assert_eq!(excerpt(&long).len(), 500);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Port 9 (discard) on localhost is almost never listening
        let client = client_for("http://127.0.0.1:9/api");
        let err = client.list_clients().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }
}
