//! Collaborator contracts the coordinator is generic over.
//!
//! The production implementations are `shelf_remote::CatalogClient`,
//! `shelf_store::ProductStore`, and [`crate::HttpProbe`]; tests substitute
//! fakes. Dependencies are injected through the coordinator's constructor,
//! never resolved from shared state.

use async_trait::async_trait;

use shelf_core::ProductPage;
use shelf_remote::{CatalogClient, RemoteError};
use shelf_store::{ProductStore, StoreError};

/// A remote source of catalog pages.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the `(skip, limit)` window from the remote catalog.
    async fn fetch_page(&self, skip: i64, limit: i64) -> Result<ProductPage, RemoteError>;
}

/// The on-device page cache.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Persists a fetched page, clearing all prior rows first when
    /// `clear_first` is set; otherwise upserts by product id. Must be atomic
    /// from a concurrent reader's point of view.
    async fn write_page(&self, page: &ProductPage, clear_first: bool) -> Result<(), StoreError>;

    /// Reads the `(skip, limit)` window. The returned `total` is the local
    /// row count, not the remote catalog size.
    async fn read_page(&self, skip: i64, limit: i64) -> Result<ProductPage, StoreError>;

    /// Removes all cached rows.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Reports whether the network currently looks reachable.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Must not fail: when connectivity cannot be determined, report
    /// offline so the coordinator fails safe toward the cache.
    async fn is_online(&self) -> bool;
}

#[async_trait]
impl ProductSource for CatalogClient {
    async fn fetch_page(&self, skip: i64, limit: i64) -> Result<ProductPage, RemoteError> {
        CatalogClient::fetch_page(self, skip, limit).await
    }
}

#[async_trait]
impl PageStore for ProductStore {
    async fn write_page(&self, page: &ProductPage, clear_first: bool) -> Result<(), StoreError> {
        ProductStore::write_page(self, page, clear_first).await
    }

    async fn read_page(&self, skip: i64, limit: i64) -> Result<ProductPage, StoreError> {
        ProductStore::read_page(self, skip, limit).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        ProductStore::clear(self).await
    }
}
