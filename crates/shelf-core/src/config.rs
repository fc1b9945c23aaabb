//! Environment-driven configuration loading.
//!
//! All values are optional with sensible defaults, so the binary runs with
//! an empty environment. The parsing core takes an injectable lookup
//! function, which lets tests drive it from a plain `HashMap` instead of
//! mutating process env vars.

use thiserror::Error;

use crate::app_config::AppConfig;

const DEFAULT_API_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PROBE_URL: &str = "https://dummyjson.com/test";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_DATABASE_URL: &str = "sqlite://shelf.db?mode=rwc";
const DEFAULT_PAGE_LIMIT: i64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: '{value}' ({reason})")]
    InvalidEnvVar {
        var: String,
        value: String,
        reason: String,
    },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup.
///
/// This is the parsing/validation core, decoupled from the real environment
/// so it can be tested with a pure map lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                value: raw,
                reason: e.to_string(),
            }),
        }
    };

    let page_limit = match lookup("SHELF_PAGE_LIMIT") {
        Err(_) => DEFAULT_PAGE_LIMIT,
        Ok(raw) => {
            let parsed = raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: "SHELF_PAGE_LIMIT".to_string(),
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            if parsed <= 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: "SHELF_PAGE_LIMIT".to_string(),
                    value: raw,
                    reason: "page limit must be positive".to_string(),
                });
            }
            parsed
        }
    };

    Ok(AppConfig {
        api_base_url: or_default("SHELF_API_BASE_URL", DEFAULT_API_BASE_URL),
        request_timeout_secs: parse_u64("SHELF_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        probe_url: or_default("SHELF_PROBE_URL", DEFAULT_PROBE_URL),
        probe_timeout_secs: parse_u64("SHELF_PROBE_TIMEOUT_SECS", DEFAULT_PROBE_TIMEOUT_SECS)?,
        database_url: or_default("DATABASE_URL", DEFAULT_DATABASE_URL),
        page_limit,
        log_level: or_default("SHELF_LOG_LEVEL", DEFAULT_LOG_LEVEL),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
