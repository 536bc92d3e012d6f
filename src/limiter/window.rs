//! Fixed Window Rate Limiter
//!
//! Process-wide admission counter reset at the start of every window.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Admitted; `remaining` more requests fit in the current window
    Allowed { remaining: u32 },
    /// Ceiling reached; the current window ends after `retry_after`
    Denied { retry_after: Duration },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed { .. })
    }
}

/// Point-in-time view of the limiter for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LimiterSnapshot {
    pub count: u32,
    pub max_requests: u32,
    pub window_secs: f64,
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    count: u32,
}

// == Rate Limiter ==
/// Admits at most `max_requests` per window of length `window`.
///
/// A window covers `[started_at, started_at + window)`; the first request at
/// or after its end opens a new window.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    state: Mutex<Window>,
}

impl RateLimiter {
    /// Creates a limiter whose first window starts now.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::starting_at(max_requests, window, Instant::now())
    }

    pub fn starting_at(max_requests: u32, window: Duration, started_at: Instant) -> Self {
        Self {
            max_requests,
            window,
            state: Mutex::new(Window {
                started_at,
                count: 0,
            }),
        }
    }

    // == Admit ==
    pub fn admit(&self) -> Admission {
        self.admit_at(Instant::now())
    }

    /// Admission check against an explicit clock reading.
    ///
    /// A denied request leaves the counter untouched.
    pub fn admit_at(&self, now: Instant) -> Admission {
        let mut state = self.lock();

        let elapsed = now.saturating_duration_since(state.started_at);
        if elapsed >= self.window {
            state.started_at = now;
            state.count = 0;
        }

        if state.count < self.max_requests {
            state.count += 1;
            Admission::Allowed {
                remaining: self.max_requests - state.count,
            }
        } else {
            let window_end = state.started_at + self.window;
            Admission::Denied {
                retry_after: window_end.saturating_duration_since(now),
            }
        }
    }

    pub fn snapshot(&self) -> LimiterSnapshot {
        let state = self.lock();
        LimiterSnapshot {
            count: state.count,
            max_requests: self.max_requests,
            window_secs: self.window.as_secs_f64(),
        }
    }

    // A panic while holding the lock cannot leave the counter inconsistent.
    fn lock(&self) -> MutexGuard<'_, Window> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
