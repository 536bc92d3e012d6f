//! Request and Response models for the proxy API

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::FetchParams;
pub use responses::{CacheStatsBody, HealthResponse, StatsResponse};
