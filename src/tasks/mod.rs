//! Background Tasks Module
//!
//! # Tasks
//! - Expired response sweep: drops cache entries whose TTL elapsed

mod cleanup;

pub use cleanup::spawn_cleanup_task;
