//! Request parameters for the proxy API
//!
//! The `/fetch` query is decoded by hand so that a malformed query string
//! never rejects a request before it has passed the rate limiter.

/// Parameters of `GET /fetch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    /// Raw target URL, `None` when absent or empty
    pub url: Option<String>,
}

impl FetchParams {
    /// Decodes a raw query string. The first non-empty `url` pair wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let url = query.and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, value)| key == "url" && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        });
        Self { url }
    }
}
