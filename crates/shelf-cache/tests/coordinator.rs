//! Coordinator behavior tests with counting fakes.
//!
//! The remote and probe are fakes with call counters; the store side uses
//! the real SQLite store behind a counting wrapper, so refresh/append
//! semantics are exercised against actual persistence.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use shelf_cache::{
    CacheError, ConnectivityProbe, PageStore, ProductCacheCoordinator, ProductSource,
};
use shelf_core::{Product, ProductPage};
use shelf_remote::RemoteError;
use shelf_store::{connect_in_memory, run_migrations, ProductStore, StoreError};

fn make_product(id: i64) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        description: String::new(),
        category: "beauty".to_string(),
        price: Decimal::new(999, 2),
        discount_percentage: Decimal::ZERO,
        rating: 4.0,
        stock: 3,
        tags: Vec::new(),
        brand: None,
        sku: format!("SKU-{id}"),
        thumbnail: String::new(),
        images: Vec::new(),
    }
}

fn make_page(ids: std::ops::RangeInclusive<i64>, total: i64, skip: i64, limit: i64) -> ProductPage {
    ProductPage {
        products: ids.map(make_product).collect(),
        total,
        skip,
        limit,
    }
}

fn ids(page: &ProductPage) -> Vec<i64> {
    page.products.iter().map(|p| p.id).collect()
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

enum RemoteBehavior {
    Serve(ProductPage),
    Fail,
}

struct FakeRemote {
    behavior: RemoteBehavior,
    calls: AtomicUsize,
}

impl FakeRemote {
    fn serving(page: ProductPage) -> Self {
        Self {
            behavior: RemoteBehavior::Serve(page),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            behavior: RemoteBehavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for &FakeRemote {
    async fn fetch_page(&self, _skip: i64, _limit: i64) -> Result<ProductPage, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            RemoteBehavior::Serve(page) => Ok(page.clone()),
            RemoteBehavior::Fail => Err(RemoteError::UnexpectedStatus {
                status: 503,
                url: "http://remote.test/products".to_string(),
            }),
        }
    }
}

/// Real SQLite store behind read/write counters, with switchable fault
/// injection.
struct CountingStore {
    inner: ProductStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: bool,
    fail_writes: bool,
}

impl CountingStore {
    async fn new() -> Self {
        let pool = connect_in_memory().await.expect("in-memory pool");
        run_migrations(&pool).await.expect("migrations should apply");
        Self {
            inner: ProductStore::new(pool),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
            fail_reads: false,
            fail_writes: false,
        }
    }

    async fn seeded(ids: std::ops::RangeInclusive<i64>) -> Self {
        let store = Self::new().await;
        let count = i64::try_from(ids.clone().count()).expect("seed count fits i64");
        store
            .inner
            .write_page(&make_page(ids, count, 0, count), true)
            .await
            .expect("seed write should succeed");
        store
    }

    fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageStore for &CountingStore {
    async fn write_page(&self, page: &ProductPage, clear_first: bool) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StoreError::Sqlx(sqlx::Error::PoolClosed));
        }
        self.inner.write_page(page, clear_first).await
    }

    async fn read_page(&self, skip: i64, limit: i64) -> Result<ProductPage, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(StoreError::Sqlx(sqlx::Error::PoolClosed));
        }
        self.inner.read_page(skip, limit).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.inner.clear().await
    }
}

struct FixedProbe {
    online: bool,
    calls: AtomicUsize,
}

impl FixedProbe {
    fn new(online: bool) -> Self {
        Self {
            online,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityProbe for &FixedProbe {
    async fn is_online(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.online
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[tokio::test]
async fn online_fetch_serves_the_remote_page_exclusively() {
    // The cache holds ids 1..50; the remote answers 201..230. The result
    // must be entirely remote, never a mix.
    let remote = FakeRemote::serving(make_page(201..=230, 120, 0, 30));
    let store = CountingStore::seeded(1..=50).await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let page = coordinator.fetch_page(0, 30).await.expect("online fetch");

    assert_eq!(ids(&page), (201..=230).collect::<Vec<_>>());
    assert_eq!(page.total, 120);
    assert_eq!(remote.calls(), 1);
    assert_eq!(store.reads(), 0, "local rows must not leak into the result");
}

#[tokio::test]
async fn refresh_replaces_the_whole_cache() {
    // Changed-catalog scenario: after a skip==0 fetch, the first
    // window of the store holds exactly the remote response.
    let remote = FakeRemote::serving(make_page(201..=230, 120, 0, 30));
    let store = CountingStore::seeded(1..=50).await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let page = coordinator.fetch_page(0, 30).await.expect("refresh");
    assert_eq!(ids(&page), (201..=230).collect::<Vec<_>>());

    let cached = store.inner.read_page(0, 30).await.expect("read back");
    assert_eq!(ids(&cached), (201..=230).collect::<Vec<_>>());
    assert_eq!(cached.total, 30, "no stale rows linger past the refresh");
}

#[tokio::test]
async fn load_more_never_clears_earlier_pages() {
    // A skip>0 fetch appends; the first window is untouched.
    let remote = FakeRemote::serving(make_page(31..=60, 120, 30, 30));
    let store = CountingStore::seeded(1..=30).await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let before = store.inner.read_page(0, 30).await.expect("window before");

    coordinator.fetch_page(30, 30).await.expect("load more");

    let after = store.inner.read_page(0, 30).await.expect("window after");
    assert_eq!(ids(&before), ids(&after));

    let appended = store.inner.read_page(30, 30).await.expect("second window");
    assert_eq!(ids(&appended), (31..=60).collect::<Vec<_>>());
}

#[tokio::test]
async fn offline_serves_the_cache_without_touching_the_remote() {
    // Offline with 10 cached rows; the remote must not be invoked.
    let remote = FakeRemote::serving(make_page(201..=230, 120, 0, 30));
    let store = CountingStore::seeded(1..=10).await;
    let probe = FixedProbe::new(false);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let page = coordinator.fetch_page(0, 30).await.expect("offline fallback");

    assert_eq!(page.products.len(), 10);
    assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    assert_eq!(remote.calls(), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn offline_with_empty_cache_is_no_cached_data() {
    // A cold cache offline is a routine, distinct outcome.
    let remote = FakeRemote::serving(make_page(1..=30, 120, 0, 30));
    let store = CountingStore::new().await;
    let probe = FixedProbe::new(false);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let err = coordinator.fetch_page(0, 30).await.unwrap_err();
    assert!(matches!(err, CacheError::NoCachedData));
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn remote_failure_falls_back_to_the_cache() {
    // A failing remote is swallowed when the cache can answer.
    let remote = FakeRemote::failing();
    let store = CountingStore::seeded(1..=30).await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let page = coordinator.fetch_page(0, 30).await.expect("fallback succeeds");

    assert_eq!(ids(&page), (1..=30).collect::<Vec<_>>());
    assert_eq!(remote.calls(), 1);
    assert_eq!(store.reads(), 1);
}

#[tokio::test]
async fn invalid_arguments_short_circuit() {
    // Bad skip/limit must not contact any collaborator, probe included.
    let remote = FakeRemote::serving(make_page(1..=30, 120, 0, 30));
    let store = CountingStore::new().await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let err = coordinator.fetch_page(-1, 30).await.unwrap_err();
    assert!(matches!(err, CacheError::InvalidArgument(_)));

    let err = coordinator.fetch_page(0, 0).await.unwrap_err();
    assert!(matches!(err, CacheError::InvalidArgument(_)));

    let err = coordinator.fetch_page(0, -5).await.unwrap_err();
    assert!(matches!(err, CacheError::InvalidArgument(_)));

    assert_eq!(probe.calls(), 0);
    assert_eq!(remote.calls(), 0);
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn failed_cache_write_does_not_fail_the_fetch() {
    // The user still has valid remote data; a broken cache only means the
    // next offline session is colder than it should be.
    let remote = FakeRemote::serving(make_page(1..=30, 120, 0, 30));
    let store = CountingStore::new().await.failing_writes();
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let page = coordinator.fetch_page(0, 30).await.expect("still a success");
    assert_eq!(page.products.len(), 30);
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn offline_store_fault_is_a_storage_error() {
    let remote = FakeRemote::serving(make_page(1..=30, 120, 0, 30));
    let store = CountingStore::new().await.failing_reads();
    let probe = FixedProbe::new(false);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let err = coordinator.fetch_page(0, 30).await.unwrap_err();
    assert!(matches!(err, CacheError::Storage(_)));
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn remote_failure_then_store_fault_surfaces_the_network_error() {
    let remote = FakeRemote::failing();
    let store = CountingStore::new().await.failing_reads();
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let err = coordinator.fetch_page(0, 30).await.unwrap_err();
    assert!(matches!(err, CacheError::Network(_)));
}

#[tokio::test]
async fn short_cached_window_is_still_a_success() {
    // Fewer cached rows than requested is not an error.
    let remote = FakeRemote::failing();
    let store = CountingStore::seeded(1..=7).await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let page = coordinator.fetch_page(0, 30).await.expect("short page is fine");
    assert_eq!(page.products.len(), 7);
    assert_eq!(page.total, 7);
}

#[tokio::test]
async fn load_more_window_past_the_cache_is_no_cached_data() {
    let remote = FakeRemote::failing();
    let store = CountingStore::seeded(1..=30).await;
    let probe = FixedProbe::new(true);
    let coordinator = ProductCacheCoordinator::new(&remote, &store, &probe);

    let err = coordinator.fetch_page(30, 30).await.unwrap_err();
    assert!(matches!(err, CacheError::NoCachedData));
}
