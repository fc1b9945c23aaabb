//! Caller-side pagination bookkeeping for a browsing session.
//!
//! `CacheState` accumulates products across successive page fetches and
//! decides which `(skip, limit)` window to request next. It lives only for
//! the duration of a browsing session and is never persisted; the local
//! product store is the coordinator's concern, not this type's.

use crate::products::{Product, ProductPage};

/// A `(skip, limit)` window to request from the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: i64,
    pub limit: i64,
}

/// Accumulated pagination state for one browsing session.
///
/// `has_more` is never stored: it is always recomputed from the number of
/// loaded products and the last known catalog total, so the two can not
/// diverge.
#[derive(Debug, Clone)]
pub struct CacheState {
    loaded: Vec<Product>,
    next_skip: i64,
    limit: i64,
    /// Catalog size as last reported by a fetched page. `None` until the
    /// first page arrives.
    total: Option<i64>,
}

impl CacheState {
    /// Fresh session with nothing loaded; the first request starts at the top.
    #[must_use]
    pub fn new(limit: i64) -> Self {
        Self {
            loaded: Vec::new(),
            next_skip: 0,
            limit,
            total: None,
        }
    }

    /// Products accumulated so far, in browsing order.
    #[must_use]
    pub fn loaded(&self) -> &[Product] {
        &self.loaded
    }

    #[must_use]
    pub fn next_skip(&self) -> i64 {
        self.next_skip
    }

    /// Last known catalog size, or `None` before the first page.
    #[must_use]
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    /// Whether more pages remain. Before the first fetch this is `true`.
    #[must_use]
    pub fn has_more(&self) -> bool {
        match self.total {
            None => true,
            Some(total) => (self.loaded.len() as i64) < total,
        }
    }

    /// The window to request for "load more", or `None` when the catalog is
    /// exhausted. A caller must not issue a request when this returns `None`.
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_more().then_some(PageRequest {
            skip: self.next_skip,
            limit: self.limit,
        })
    }

    /// The window for a refresh: always the top of the catalog.
    #[must_use]
    pub fn refresh_request(&self) -> PageRequest {
        PageRequest {
            skip: 0,
            limit: self.limit,
        }
    }

    /// Records a successful refresh: the loaded set is replaced wholesale,
    /// not appended, and the skip cursor restarts after the new first page.
    pub fn record_refresh(&mut self, page: &ProductPage) {
        self.loaded = page.products.clone();
        self.next_skip = self.loaded.len() as i64;
        self.total = Some(page.total);
    }

    /// Records a successful "load more": appends and advances the cursor by
    /// the number of products actually returned, which may be fewer than
    /// requested at the end of the catalog.
    pub fn record_page(&mut self, page: &ProductPage) {
        self.loaded.extend(page.products.iter().cloned());
        self.next_skip += page.products.len() as i64;
        self.total = Some(page.total);
    }
}
