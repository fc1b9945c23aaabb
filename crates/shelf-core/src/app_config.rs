/// Application configuration, resolved once at startup by the composition
/// root and handed down to the components that need it.
///
/// Every field has a default; the binary runs with an empty environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the remote catalog API.
    pub api_base_url: String,
    /// Request timeout for catalog page fetches, in seconds.
    pub request_timeout_secs: u64,
    /// URL probed (HEAD) to decide whether the network is reachable.
    pub probe_url: String,
    /// Timeout for the connectivity probe; kept short so an offline device
    /// falls back to the cache quickly.
    pub probe_timeout_secs: u64,
    /// SQLite URL for the on-device product cache.
    pub database_url: String,
    /// Page size used by the browsing session.
    pub page_limit: i64,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}
