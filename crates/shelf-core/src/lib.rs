pub mod app_config;
pub mod cache_state;
pub mod config;
pub mod products;

pub use app_config::AppConfig;
pub use cache_state::{CacheState, PageRequest};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use products::{Product, ProductPage};
