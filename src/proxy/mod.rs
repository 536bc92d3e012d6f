//! Proxy Module
//!
//! The outbound side of the proxy: target validation, User-Agent rotation
//! and the upstream fetch.

pub mod fetcher;
pub mod validator;
pub mod user_agent;

pub use fetcher::{FetchedResponse, Fetcher, HttpFetcher};
pub use validator::canonicalize;
pub use user_agent::UserAgentRotator;
