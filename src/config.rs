//! Configuration Module
//!
//! Handles loading proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of cached responses
    pub cache_max_entries: usize,
    /// Lifetime of a cached response in seconds
    pub cache_ttl: u64,
    /// Bodies of this many bytes or more are relayed but never cached
    pub max_cacheable_body: usize,
    /// Requests admitted per rate limit window
    pub rate_limit_max_requests: u32,
    /// Rate limit window length in seconds
    pub rate_limit_window: u64,
    /// Hard timeout for one upstream fetch in milliseconds
    pub upstream_timeout_ms: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cached responses (default: 500)
    /// - `CACHE_TTL_SECS` - Cached response lifetime (default: 30)
    /// - `MAX_CACHEABLE_BODY` - Cacheable body size bound in bytes (default: 200000)
    /// - `RATE_LIMIT_MAX_REQUESTS` - Requests per window (default: 30)
    /// - `RATE_LIMIT_WINDOW_SECS` - Window length (default: 10)
    /// - `UPSTREAM_TIMEOUT_MS` - Upstream fetch timeout (default: 4000)
    /// - `CLEANUP_INTERVAL_SECS` - Expired entry sweep frequency (default: 5)
    ///
    /// Unset or unparseable variables fall back to their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("PORT", defaults.server_port),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl: env_or("CACHE_TTL_SECS", defaults.cache_ttl),
            max_cacheable_body: env_or("MAX_CACHEABLE_BODY", defaults.max_cacheable_body),
            rate_limit_max_requests: env_or(
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            ),
            rate_limit_window: env_or("RATE_LIMIT_WINDOW_SECS", defaults.rate_limit_window),
            upstream_timeout_ms: env_or("UPSTREAM_TIMEOUT_MS", defaults.upstream_timeout_ms),
            cleanup_interval: env_or("CLEANUP_INTERVAL_SECS", defaults.cleanup_interval),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: 500,
            cache_ttl: 30,
            max_cacheable_body: 200_000,
            rate_limit_max_requests: 30,
            rate_limit_window: 10,
            upstream_timeout_ms: 4000,
            cleanup_interval: 5,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
