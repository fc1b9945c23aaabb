//! HTTP client for the paginated product listing endpoint.
//!
//! Wraps `reqwest` with typed error handling and response deserialization.
//! The endpoint serves `GET {base}/products?limit=&skip=` and answers with a
//! `{ products, total, skip, limit }` envelope; mapping that envelope into
//! the domain [`ProductPage`] is this crate's concern, not the caller's.

use std::time::Duration;

use reqwest::{Client, Url};
use shelf_core::ProductPage;

use crate::error::RemoteError;
use crate::types::ProductsEnvelope;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "shelf/0.1 (catalog-cache)";

/// Client for the remote product catalog.
///
/// Holds the HTTP client and base URL. Point `base_url` at a mock server in
/// tests; production configuration comes from `AppConfig::api_base_url`.
#[derive(Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client with configured request timeout and `User-Agent`.
    ///
    /// No retries are performed by this client or anything above it; a failed
    /// fetch is reported to the caller, which falls back to the local cache.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`RemoteError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        // Normalise: exactly one trailing slash, so Url::join appends the
        // path segment instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| RemoteError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches one page of the catalog.
    ///
    /// # Errors
    ///
    /// - [`RemoteError::Http`] on network failure or timeout.
    /// - [`RemoteError::UnexpectedStatus`] on a non-2xx response.
    /// - [`RemoteError::Deserialize`] if the body does not match the
    ///   expected envelope.
    pub async fn fetch_page(&self, skip: i64, limit: i64) -> Result<ProductPage, RemoteError> {
        let url = self.products_url(skip, limit)?;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let envelope: ProductsEnvelope =
            serde_json::from_str(&body).map_err(|e| RemoteError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        Ok(envelope.into())
    }

    /// Builds the listing URL with percent-encoded query parameters.
    fn products_url(&self, skip: i64, limit: i64) -> Result<Url, RemoteError> {
        let mut url = self
            .base_url
            .join("products")
            .map_err(|e| RemoteError::InvalidBaseUrl(format!("'{}': {e}", self.base_url)))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("skip", &skip.to_string());
        Ok(url)
    }
}
