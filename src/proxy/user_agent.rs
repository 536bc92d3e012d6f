//! User-Agent rotation for outbound fetches.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Desktop and mobile browser User-Agent strings.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
];

/// Picks a User-Agent uniformly at random on every call.
#[derive(Debug)]
pub struct UserAgentRotator {
    agents: Vec<&'static str>,
    rng: Mutex<StdRng>,
}

impl UserAgentRotator {
    /// Rotator over [`USER_AGENTS`] seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(USER_AGENTS.to_vec(), StdRng::from_entropy())
    }

    /// Deterministic rotator, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(USER_AGENTS.to_vec(), StdRng::seed_from_u64(seed))
    }

    /// Rotator over a custom list. An empty list falls back to [`USER_AGENTS`].
    pub fn with_agents(agents: Vec<&'static str>, seed: u64) -> Self {
        Self::from_rng(agents, StdRng::seed_from_u64(seed))
    }

    fn from_rng(agents: Vec<&'static str>, rng: StdRng) -> Self {
        let agents = if agents.is_empty() {
            USER_AGENTS.to_vec()
        } else {
            agents
        };
        Self {
            agents,
            rng: Mutex::new(rng),
        }
    }

    pub fn pick(&self) -> &'static str {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        self.agents
            .choose(&mut *rng)
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }
}

impl Default for UserAgentRotator {
    fn default() -> Self {
        Self::new()
    }
}
