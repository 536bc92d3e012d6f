//! Fetch Proxy - A forwarding HTTP proxy
//!
//! Fetches a caller-supplied URL and relays the response, with a process-wide
//! rate limit, a TTL and LRU bounded response cache, and a hard upstream
//! timeout.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod limiter;
pub mod models;
pub mod proxy;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ProxyError, Result};
pub use tasks::spawn_cleanup_task;
