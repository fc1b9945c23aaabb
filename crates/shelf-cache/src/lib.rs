pub mod coordinator;
pub mod error;
pub mod probe;
pub mod traits;

pub use coordinator::ProductCacheCoordinator;
pub use error::CacheError;
pub use probe::HttpProbe;
pub use traits::{ConnectivityProbe, PageStore, ProductSource};
