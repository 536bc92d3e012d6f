//! Upstream Fetcher
//!
//! Performs the outbound GET for a validated URL under a hard timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use tracing::debug;

use crate::error::{ProxyError, Result};
use crate::proxy::UserAgentRotator;

/// `Accept` header sent with every upstream request.
pub const ACCEPT_VALUE: &str = "text/html,application/json,application/xml,*/*";

/// Content type assumed when the upstream sends none.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const MAX_REDIRECTS: usize = 10;

/// A fully read upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

/// Source of upstream responses.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, which has already been validated and canonicalized.
    async fn fetch(&self, url: &str) -> Result<FetchedResponse>;
}

// == HTTP Fetcher ==
/// [`Fetcher`] backed by a pooled `reqwest` client.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agents: UserAgentRotator,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(user_agents: UserAgentRotator, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .no_proxy()
            .build()
            .map_err(|e| ProxyError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agents,
            timeout,
        })
    }

    async fn send(&self, url: &str) -> std::result::Result<FetchedResponse, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agents.pick())
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let body = response.text().await?;

        Ok(FetchedResponse {
            status,
            content_type,
            body,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// The timeout covers connect, redirects and the body read. On expiry the
    /// in-flight request is dropped.
    async fn fetch(&self, url: &str) -> Result<FetchedResponse> {
        match tokio::time::timeout(self.timeout, self.send(url)).await {
            Ok(Ok(response)) => {
                debug!(url, status = response.status, bytes = response.body.len(), "upstream fetched");
                Ok(response)
            }
            Ok(Err(e)) => Err(ProxyError::UpstreamError(e.to_string())),
            Err(_) => Err(ProxyError::UpstreamTimeout(self.timeout)),
        }
    }
}
