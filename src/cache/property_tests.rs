//! Property-Based Tests for the Response Cache
//!
//! Runs random operation sequences against the cache and a simple reference
//! model of LRU order.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{CachedResponse, ResponseCache};

const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Canonical-looking URLs drawn from a small pool so sequences revisit keys.
fn url_strategy() -> impl Strategy<Value = String> {
    (0u8..24).prop_map(|n| format!("https://origin{}.test/path?q={}", n % 6, n))
}

fn body_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>/]{1,128}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { url: String, body: String },
    Get { url: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (url_strategy(), body_strategy()).prop_map(|(url, body)| CacheOp::Set { url, body }),
        url_strategy().prop_map(|url| CacheOp::Get { url }),
    ]
}

/// Reference model: keys ordered from least to most recently used.
#[derive(Default)]
struct LruModel {
    order: Vec<String>,
}

impl LruModel {
    fn touch(&mut self, key: &str) {
        self.order.retain(|k| k != key);
        self.order.push(key.to_string());
    }

    fn set(&mut self, key: &str, capacity: usize) {
        if !self.order.iter().any(|k| k == key) && self.order.len() >= capacity {
            self.order.remove(0);
        }
        self.touch(key);
    }

    fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The cache never holds more than its capacity.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..8,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let mut cache = ResponseCache::new(capacity, TEST_TTL);

        for op in ops {
            match op {
                CacheOp::Set { url, body } => {
                    cache.set(url, CachedResponse::new(200, "text/plain", body));
                }
                CacheOp::Get { url } => {
                    cache.get(&url);
                }
            }
            prop_assert!(cache.len() <= capacity, "{} > {}", cache.len(), capacity);
        }
    }

    /// Resident keys always match a reference LRU model.
    #[test]
    fn prop_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let mut cache = ResponseCache::new(capacity, TEST_TTL);
        let mut model = LruModel::default();

        for op in ops {
            match op {
                CacheOp::Set { url, body } => {
                    cache.set(url.clone(), CachedResponse::new(200, "text/plain", body));
                    model.set(&url, capacity);
                }
                CacheOp::Get { url } => {
                    let hit = cache.get(&url).is_some();
                    prop_assert_eq!(hit, model.contains(&url));
                    if hit {
                        model.touch(&url);
                    }
                }
            }
        }

        for key in &model.order {
            prop_assert!(cache.has(key), "model key {} missing from cache", key);
        }
        prop_assert_eq!(cache.len(), model.order.len());
    }

    /// The most recent write for a key is what a subsequent read returns.
    #[test]
    fn prop_last_write_wins(
        url in url_strategy(),
        bodies in prop::collection::vec(body_strategy(), 1..10)
    ) {
        let mut cache = ResponseCache::new(4, TEST_TTL);

        for body in &bodies {
            cache.set(url.clone(), CachedResponse::new(200, "text/plain", body.clone()));
        }

        let last = bodies.last().cloned().unwrap_or_default();
        prop_assert_eq!(cache.get(&url).map(|r| r.body), Some(last));
    }

    /// Hit and miss counters reflect every lookup.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut cache = ResponseCache::new(8, TEST_TTL);
        let mut hits = 0u64;
        let mut misses = 0u64;
        let mut written = HashSet::new();

        for op in ops {
            match op {
                CacheOp::Set { url, body } => {
                    written.insert(url.clone());
                    cache.set(url, CachedResponse::new(200, "text/plain", body));
                }
                CacheOp::Get { url } => match cache.get(&url) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.total_entries, cache.len());
        prop_assert!(cache.len() <= written.len());
    }
}
