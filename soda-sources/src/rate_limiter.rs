//! Client-side request throttling

use crate::error::{Result, SodaError};
use governor::{clock, state::{InMemoryState, NotKeyed}, Quota, RateLimiter as GovernorRateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Requests per second
    pub requests_per_second: u32,
    /// Requests allowed back to back before throttling kicks in
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            burst_size: 10,
        }
    }
}

/// Shared token bucket; clones draw from the same quota.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<GovernorRateLimiter<NotKeyed, InMemoryState, clock::DefaultClock>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimiterConfig) -> Result<Self> {
        let rps = NonZeroU32::new(config.requests_per_second).ok_or_else(|| {
            SodaError::ConfigError("requests_per_second must be > 0".to_string())
        })?;

        let burst = NonZeroU32::new(config.burst_size)
            .ok_or_else(|| SodaError::ConfigError("burst_size must be > 0".to_string()))?;

        let quota = Quota::per_second(rps).allow_burst(burst);

        Ok(Self {
            limiter: Arc::new(GovernorRateLimiter::direct(quota)),
        })
    }

    /// Wait until the quota allows another request
    pub async fn acquire(&self) {
        loop {
            match self.limiter.check() {
                Ok(_) => return,
                Err(not_until) => {
                    let wait = not_until.wait_time_from(clock::Clock::now(&clock::DefaultClock::default()));
                    debug!("Rate limited - waiting {:?}", wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// Take a slot without waiting
    pub fn try_acquire(&self) -> Result<()> {
        self.limiter
            .check()
            .map_err(|_| SodaError::RateLimitExceeded("request quota used up".to_string()))
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}
