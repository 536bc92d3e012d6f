//! API Handlers
//!
//! The `/fetch` pipeline and the service endpoints around it.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, warn};

use crate::cache::{CachedResponse, ResponseCache};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::limiter::RateLimiter;
use crate::models::{FetchParams, HealthResponse, StatsResponse};
use crate::proxy::{canonicalize, FetchedResponse, Fetcher, HttpFetcher, UserAgentRotator};

/// Plain-text body of `GET /`.
pub const ROOT_MESSAGE: &str = "Proxy running";

/// Application state shared across all handlers.
///
/// The cache sits behind a write-locked `RwLock` because reads update LRU
/// order and statistics. No lock is held across the upstream fetch.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<ResponseCache>>,
    pub limiter: Arc<RateLimiter>,
    pub fetcher: Arc<dyn Fetcher>,
    /// Bodies of this many bytes or more are never cached
    pub max_cacheable_body: usize,
}

impl AppState {
    pub fn new(
        cache: ResponseCache,
        limiter: RateLimiter,
        fetcher: Arc<dyn Fetcher>,
        max_cacheable_body: usize,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            limiter: Arc::new(limiter),
            fetcher,
            max_cacheable_body,
        }
    }

    /// Builds the cache, limiter and HTTP fetcher from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = ResponseCache::new(config.cache_max_entries, config.cache_ttl());
        let limiter = RateLimiter::new(config.rate_limit_max_requests, config.rate_limit_window());
        let fetcher = HttpFetcher::new(UserAgentRotator::new(), config.upstream_timeout())?;

        Ok(Self::new(
            cache,
            limiter,
            Arc::new(fetcher),
            config.max_cacheable_body,
        ))
    }

    fn is_cacheable(&self, body: &str) -> bool {
        !body.is_empty() && body.len() < self.max_cacheable_body
    }
}

/// Handler for GET /fetch?url=<absolute-url>
///
/// Validation, cache lookup, upstream fetch, cache store, relay. The rate
/// check has already run in [`rate_limit_middleware`](super::middleware::rate_limit_middleware).
pub async fn fetch_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    let raw = FetchParams::from_query(query.as_deref())
        .url
        .ok_or(ProxyError::MissingParameter)?;
    let target = canonicalize(&raw)
        .inspect_err(|e| debug!(url = %raw, error = %e, "rejected target"))?;

    let cached = state.cache.write().await.get(&target);
    if let Some(cached) = cached {
        debug!(url = %target, "cache hit");
        return Ok(replay(cached));
    }

    let fetched = state
        .fetcher
        .fetch(&target)
        .await
        .inspect_err(|e| warn!(url = %target, error = %e, "upstream fetch failed"))?;

    if state.is_cacheable(&fetched.body) {
        let entry = CachedResponse::new(fetched.status, &fetched.content_type, &fetched.body);
        state.cache.write().await.set(target.clone(), entry);
        debug!(url = %target, bytes = fetched.body.len(), "response cached");
    }

    Ok(relay(fetched))
}

/// Fresh upstream response: mirrored status and content type, never cacheable
/// by intermediaries.
fn relay(fetched: FetchedResponse) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type_value(&fetched.content_type));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    (status_code(fetched.status), headers, fetched.body).into_response()
}

/// Cached response: stored headers and body replayed verbatim.
fn replay(cached: CachedResponse) -> Response {
    let mut headers = HeaderMap::new();
    for (name, value) in &cached.headers {
        let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) else {
            continue;
        };
        headers.insert(name, value);
    }

    (status_code(cached.status), headers, cached.body).into_response()
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn content_type_value(content_type: &str) -> HeaderValue {
    HeaderValue::from_str(content_type)
        .unwrap_or_else(|_| HeaderValue::from_static(crate::proxy::fetcher::DEFAULT_CONTENT_TYPE))
}

/// Handler for GET /
pub async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let response = StatsResponse::new(
        &cache.stats(),
        cache.max_entries(),
        state.limiter.snapshot(),
    );
    info!(entries = response.cache.total_entries, "stats requested");
    Json(response)
}
