//! Rate limiting middleware
//!
//! Every request handled by the router passes the process-wide limiter
//! before any handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ProxyError;
use crate::limiter::Admission;

use super::handlers::AppState;

/// Rejects the request with 429 and `retry-after` once the window is full.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Admission::Denied { retry_after } = state.limiter.admit() {
        warn!(path = %request.uri().path(), ?retry_after, "rate limit exceeded");
        return ProxyError::RateLimited { retry_after }.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use crate::cache::ResponseCache;
    use crate::error::Result;
    use crate::limiter::RateLimiter;
    use crate::proxy::{FetchedResponse, Fetcher};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::util::ServiceExt;

    struct UnusedUpstream;

    #[async_trait]
    impl Fetcher for UnusedUpstream {
        async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
            Err(ProxyError::UpstreamError(format!("unexpected fetch of {}", url)))
        }
    }

    fn app_with_limit(max_requests: u32) -> Router {
        create_router(AppState::new(
            ResponseCache::new(10, Duration::from_secs(30)),
            RateLimiter::new(max_requests, Duration::from_secs(60)),
            Arc::new(UnusedUpstream),
            200_000,
        ))
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_rate_limit_checked_before_validation() {
        let app = app_with_limit(1);

        assert_eq!(get(&app, "/fetch").await.status(), StatusCode::BAD_REQUEST);

        let throttled = get(&app, "/fetch").await;
        assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(throttled.headers().contains_key(header::RETRY_AFTER));
    }

    #[tokio::test]
    async fn test_every_route_counts_against_window() {
        let app = app_with_limit(3);

        assert_eq!(get(&app, "/").await.status(), StatusCode::OK);
        assert_eq!(get(&app, "/health").await.status(), StatusCode::OK);
        assert_eq!(get(&app, "/stats").await.status(), StatusCode::OK);

        for uri in ["/", "/health", "/stats", "/fetch?url=http://a.test/"] {
            assert_eq!(
                get(&app, uri).await.status(),
                StatusCode::TOO_MANY_REQUESTS,
                "{}",
                uri
            );
        }
    }
}
