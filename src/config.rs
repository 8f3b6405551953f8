//! Cart configuration parsed from environment variables.

use crate::cookie::DEFAULT_COOKIE_MAX_BYTES;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Storefront origin; the update endpoint is `{base_url}/update_item/`.
    pub base_url: String,
    pub timeouts: Timeouts,
    pub cookie_max_bytes: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeouts: Timeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            cookie_max_bytes: DEFAULT_COOKIE_MAX_BYTES,
        }
    }
}

impl CartConfig {
    /// Build typed cart config from environment variables.
    ///
    /// Optional:
    /// - `CART_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `CART_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CART_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CART_COOKIE_MAX_BYTES`: default 4096
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("CART_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts: Timeouts {
                request_secs: env_parse("CART_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("CART_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            cookie_max_bytes: env_parse("CART_COOKIE_MAX_BYTES", DEFAULT_COOKIE_MAX_BYTES),
        }
    }

    /// Full URL of the authenticated cart mutation endpoint.
    #[must_use]
    pub fn update_item_url(&self) -> String {
        format!("{}/update_item/", self.base_url)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
