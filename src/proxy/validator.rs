//! Target URL validation.

use url::Url;

use crate::error::{ProxyError, Result};

/// Parses `raw` as an absolute http(s) URL and returns its canonical form.
///
/// The canonical form is the cache key: scheme and host are lowercased,
/// default ports dropped and an empty path becomes `/`.
pub fn canonicalize(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url.into()),
        other => Err(ProxyError::InvalidUrl(format!(
            "unsupported scheme: {}",
            other
        ))),
    }
}
