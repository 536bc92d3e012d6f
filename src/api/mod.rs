//! API Module
//!
//! HTTP handlers, rate limiting middleware and routing for the proxy.
//!
//! # Endpoints
//! - `GET /` - Liveness message
//! - `GET /fetch?url=<absolute-url>` - Proxy a GET request
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache and rate limiter statistics

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
