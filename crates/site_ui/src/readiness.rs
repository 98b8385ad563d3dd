//! Bounded waiting for nodes that a third-party widget inserts on its own
//! schedule.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

const DEFAULT_MAX_ATTEMPTS: u32 = 50;
const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    #[error("gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// Runs `check` until it yields a value, sleeping `policy.interval` between
/// attempts. Dropping the returned future cancels the wait.
pub async fn wait_until_present<T, F>(mut check: F, policy: RetryPolicy) -> Result<T, ReadinessError>
where
    F: FnMut() -> Option<T>,
{
    let attempts = policy.max_attempts.max(1);
    let started = Instant::now();

    let polling = async {
        for attempt in 0..attempts {
            if let Some(found) = check() {
                debug!(
                    attempt = attempt + 1,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "readiness: target present"
                );
                return Ok(found);
            }
            if attempt + 1 < attempts {
                sleep(policy.interval).await;
            }
        }
        Err(ReadinessError::Exhausted { attempts })
    };

    let outcome = match timeout(policy.timeout, polling).await {
        Ok(result) => result,
        Err(_) => Err(ReadinessError::TimedOut(policy.timeout)),
    };
    if let Err(err) = &outcome {
        warn!(error = %err, "readiness: target never appeared");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn policy(max_attempts: u32, interval_ms: u64, timeout_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn returns_as_soon_as_check_succeeds() {
        let calls = Cell::new(0);
        let found = wait_until_present(
            || {
                calls.set(calls.get() + 1);
                (calls.get() == 3).then_some("button")
            },
            policy(10, 100, 5_000),
        )
        .await
        .expect("found");

        assert_eq!(found, "button");
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_max_attempts() {
        let calls = Cell::new(0);
        let err = wait_until_present(
            || {
                calls.set(calls.get() + 1);
                None::<()>
            },
            policy(4, 100, 5_000),
        )
        .await
        .expect_err("exhausted");

        assert_eq!(err, ReadinessError::Exhausted { attempts: 4 });
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn overall_timeout_wins_over_remaining_attempts() {
        let err = wait_until_present(|| None::<()>, policy(100, 300, 1_000))
            .await
            .expect_err("timed out");

        assert_eq!(err, ReadinessError::TimedOut(Duration::from_millis(1_000)));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_checks_once() {
        let found = wait_until_present(|| Some(7), policy(0, 100, 1_000))
            .await
            .expect("found");
        assert_eq!(found, 7);
    }
}
