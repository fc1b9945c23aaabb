use thiserror::Error;

use shelf_remote::RemoteError;
use shelf_store::StoreError;

/// Errors surfaced by the cache coordinator.
///
/// `NoCachedData` is a routine outcome (offline with a cold cache), not a
/// bug; callers are expected to match on it and render different copy than
/// for `Network`/`Storage`, which are genuine retryable failures.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The page request was malformed; no collaborator was contacted.
    #[error("invalid page request: {0}")]
    InvalidArgument(String),

    /// The remote was unreachable (or its fetch failed) and the local store
    /// holds nothing for the requested window.
    #[error("offline and nothing cached for the requested window")]
    NoCachedData,

    /// The remote fetch failed and the cache fallback also faulted.
    #[error("remote fetch failed: {0}")]
    Network(#[source] RemoteError),

    /// The local store faulted while serving an offline read.
    #[error("local cache failed: {0}")]
    Storage(#[source] StoreError),
}
