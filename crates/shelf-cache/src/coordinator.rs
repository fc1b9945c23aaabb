//! The cache-aside coordinator: remote first, local fallback.

use shelf_core::ProductPage;
use shelf_remote::RemoteError;

use crate::error::CacheError;
use crate::traits::{ConnectivityProbe, PageStore, ProductSource};

/// Decides, per page request, whether to serve the remote catalog or the
/// on-device cache, and keeps the cache in sync with remote results.
///
/// Every `fetch_page` call resolves to exactly one source: the returned page
/// is entirely remote or entirely local, never merged. A first-page request
/// (`skip == 0`) served from the remote replaces the whole cache; a
/// later-page request only appends, so a refresh in one session and a
/// load-more in another never race to wipe each other's rows. One known
/// limitation follows from that contract: a refresh clear can silently drop
/// a page appended concurrently by another coordinator sharing the same
/// store. Acceptable for a read-mostly catalog cache; no cross-process
/// locking is attempted.
///
/// The coordinator performs no retries; timeouts and backoff belong to the
/// collaborators.
pub struct ProductCacheCoordinator<R, S, C> {
    remote: R,
    store: S,
    probe: C,
}

impl<R, S, C> ProductCacheCoordinator<R, S, C>
where
    R: ProductSource,
    S: PageStore,
    C: ConnectivityProbe,
{
    #[must_use]
    pub fn new(remote: R, store: S, probe: C) -> Self {
        Self {
            remote,
            store,
            probe,
        }
    }

    /// Produces the `(skip, limit)` page, preferring fresh remote data.
    ///
    /// Online, a successful remote fetch is written into the cache before
    /// this returns (`clear_first` when `skip == 0`), so a caller that
    /// immediately re-reads the store observes the just-written rows. A
    /// failed cache write is logged and does not fail the call; the caller
    /// still has valid data to display. A failed remote fetch falls back to
    /// the cache instead of propagating.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidArgument`] for `skip < 0` or `limit <= 0`,
    ///   before any collaborator is contacted.
    /// - [`CacheError::NoCachedData`] when the remote is unreachable or
    ///   failed and the cache holds nothing for this window.
    /// - [`CacheError::Storage`] when an offline cache read faults.
    /// - [`CacheError::Network`] when the remote fetch failed and the cache
    ///   fallback then faulted as well.
    pub async fn fetch_page(&self, skip: i64, limit: i64) -> Result<ProductPage, CacheError> {
        if skip < 0 {
            return Err(CacheError::InvalidArgument(format!(
                "skip must be non-negative, got {skip}"
            )));
        }
        if limit <= 0 {
            return Err(CacheError::InvalidArgument(format!(
                "limit must be positive, got {limit}"
            )));
        }

        let mut remote_failure: Option<RemoteError> = None;
        if self.probe.is_online().await {
            match self.remote.fetch_page(skip, limit).await {
                Ok(page) => {
                    // A refresh replaces the cache wholesale; a load-more
                    // only appends.
                    let clear_first = skip == 0;
                    if let Err(e) = self.store.write_page(&page, clear_first).await {
                        tracing::warn!(
                            error = %e,
                            skip,
                            limit,
                            "cache write failed; serving remote page anyway"
                        );
                    }
                    return Ok(page);
                }
                Err(e) => {
                    tracing::debug!(
                        error = %e,
                        skip,
                        limit,
                        "remote fetch failed; falling back to cache"
                    );
                    remote_failure = Some(e);
                }
            }
        }

        match self.store.read_page(skip, limit).await {
            Ok(page) if page.is_empty() => Err(CacheError::NoCachedData),
            Ok(page) => Ok(page),
            Err(storage) => match remote_failure {
                Some(remote) => {
                    tracing::warn!(
                        error = %storage,
                        "cache fallback failed after remote failure"
                    );
                    Err(CacheError::Network(remote))
                }
                None => Err(CacheError::Storage(storage)),
            },
        }
    }
}
