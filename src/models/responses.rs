//! Response DTOs for the proxy's JSON endpoints

use serde::Serialize;

use crate::cache::CacheStats;
use crate::limiter::LimiterSnapshot;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache: CacheStatsBody,
    pub rate_limit: LimiterSnapshot,
}

/// Cache section of [`StatsResponse`].
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsBody {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    pub max_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, max_entries: usize, rate_limit: LimiterSnapshot) -> Self {
        Self {
            cache: CacheStatsBody {
                hits: stats.hits,
                misses: stats.misses,
                evictions: stats.evictions,
                expirations: stats.expirations,
                total_entries: stats.total_entries,
                max_entries,
                hit_rate: stats.hit_rate(),
            },
            rate_limit,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
