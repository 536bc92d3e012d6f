//! Error types for the proxy
//!
//! Every failure of the request pipeline is converted into a short plain-text
//! response at the handler boundary.

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message sent to throttled callers.
pub const THROTTLE_MESSAGE: &str = "Too many requests, please try again in a few seconds.";

// == Proxy Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// No `url` query value supplied
    #[error("missing URL")]
    MissingParameter,

    /// Unparseable URL or scheme other than http/https
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limit window ceiling reached
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    /// Upstream did not answer within the fetch timeout
    #[error("upstream timed out after {0:?}")]
    UpstreamTimeout(Duration),

    /// Network-level failure talking to the upstream
    #[error("upstream error: {0}")]
    UpstreamError(String),

    /// Invalid startup configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProxyError {
    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter | ProxyError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ProxyError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::UpstreamTimeout(_) | ProxyError::UpstreamError(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the caller. Upstream causes stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProxyError::MissingParameter => "missing URL",
            ProxyError::InvalidUrl(_) => "invalid URL",
            ProxyError::RateLimited { .. } => THROTTLE_MESSAGE,
            ProxyError::UpstreamTimeout(_) | ProxyError::UpstreamError(_) => {
                "failed to reach upstream"
            }
            ProxyError::Config(_) => "internal error",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, self.public_message()).into_response();

        if let ProxyError::RateLimited { retry_after } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, retry_after_secs(retry_after).into());
        }

        response
    }
}

/// Whole seconds until a retry makes sense, rounded up and never zero.
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
