//! Rate Limiter Module
//!
//! Bounds the number of proxied requests per fixed time window.

mod window;

pub use window::{Admission, LimiterSnapshot, RateLimiter};
