//! Cache Entry Module
//!
//! Defines a cached upstream response and its lifetime.

use std::collections::HashMap;
use std::time::{Duration, Instant};

// == Cached Response ==
/// The replayable part of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    /// Upstream status code of the fetch that produced this response
    pub status: u16,
    /// Response headers to replay, keyed by lowercase name
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: String,
}

impl CachedResponse {
    /// Builds a response carrying only a `content-type` header.
    pub fn new(status: u16, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.into());
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

// == Cache Entry ==
/// A cached response together with its insertion time and TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub response: CachedResponse,
    pub inserted_at: Instant,
    pub ttl: Duration,
}

impl CacheEntry {
    pub fn new(response: CachedResponse, ttl: Duration) -> Self {
        Self::with_insertion_time(response, ttl, Instant::now())
    }

    pub fn with_insertion_time(response: CachedResponse, ttl: Duration, inserted_at: Instant) -> Self {
        Self {
            response,
            inserted_at,
            ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once its full TTL has elapsed (`now >= inserted_at + ttl`).
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Remaining lifetime, zero once expired.
    #[allow(dead_code)]
    pub fn ttl_remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.inserted_at.elapsed())
    }
}
