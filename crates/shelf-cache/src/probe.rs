//! HTTP-based connectivity probe.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use shelf_remote::RemoteError;

use crate::traits::ConnectivityProbe;

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Decides "online" by sending a HEAD request to a well-known URL.
///
/// Any response at all counts as online (a 500 from the probe target still
/// proves the network path works); any transport error or timeout counts as
/// offline. The timeout should be short so an offline device falls back to
/// the cache quickly.
pub struct HttpProbe {
    client: Client,
    url: Url,
}

impl HttpProbe {
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the HTTP client cannot be built, or
    /// [`RemoteError::InvalidBaseUrl`] if `url` does not parse.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .build()?;
        let url =
            Url::parse(url).map_err(|e| RemoteError::InvalidBaseUrl(format!("'{url}': {e}")))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn is_online(&self) -> bool {
        self.client.head(self.url.clone()).send().await.is_ok()
    }
}
