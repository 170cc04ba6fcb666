//! Bounded retry with exponential backoff

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry (milliseconds)
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay (milliseconds)
    pub max_delay_ms: u64,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let mut delay_ms = self.initial_delay_ms;
        for _ in 0..attempt {
            delay_ms = (delay_ms as f64 * self.backoff_multiplier) as u64;
            delay_ms = delay_ms.min(self.max_delay_ms);
        }
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }

    /// Runs `op` until it succeeds, fails with a non-retryable error, or the
    /// retries run out. The last error is returned as-is.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "{} attempt {} failed: {}. Retrying in {}ms",
                        what,
                        attempt + 1,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SodaError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_delay_ms: 1,
            max_delay_ms: 2,
            backoff_multiplier: 2.0,
        }
    }

    #[test]
    fn test_delay_backoff_is_capped() {
        let policy = RetryPolicy {
            max_retries: 10,
            initial_delay_ms: 100,
            max_delay_ms: 1000,
            backoff_multiplier: 2.0,
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(800));
        assert_eq!(policy.delay_for(4), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(9), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_recovers_from_transient_errors() {
        let calls = AtomicU32::new(0);
        let result = fast_policy(3)
            .run("fetch", || async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(SodaError::RemoteError { status: 503, body: String::new() })
                } else {
                    Ok(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast_policy(2)
            .run("fetch", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SodaError::TransportError("connection refused".into()))
            })
            .await;

        assert!(matches!(result, Err(SodaError::TransportError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = fast_policy(5)
            .run("fetch", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(SodaError::RemoteError { status: 404, body: String::new() })
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(404));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
