//! Retry Infrastructure
//!
//! Bounded retry and polling policies. Every policy has both an attempt
//! cap and an overall deadline, so no caller can block indefinitely on a
//! stalled remote party.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Retry / polling configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
    /// Growth factor applied to the delay after each attempt
    pub multiplier: u32,
    /// Overall deadline measured from the first attempt
    pub deadline: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
            multiplier: 2,
            deadline: Duration::from_secs(15),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration, deadline: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            deadline,
            ..Default::default()
        }
    }

    /// Fixed-interval polling (no growth)
    pub fn fixed(interval: Duration, deadline: Duration) -> Self {
        Self {
            max_attempts: u32::MAX,
            initial_delay: interval,
            max_delay: interval,
            multiplier: 1,
            deadline,
        }
    }

    /// Single attempt, no retry
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .max(1)
            .saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    pub fn deadline_ms(&self) -> i64 {
        self.deadline.as_millis() as i64
    }
}

/// Why a retried operation gave up
#[derive(Debug)]
pub enum RetryError<E> {
    /// The last error was not retryable, or attempts ran out
    Failed { error: E, attempts: u32 },
    /// The deadline passed; carries the last error seen, if any
    DeadlineExceeded { last_error: Option<E>, attempts: u32 },
}

impl<E> RetryError<E> {
    /// The most recent underlying error
    pub fn into_last_error(self) -> Option<E> {
        match self {
            RetryError::Failed { error, .. } => Some(error),
            RetryError::DeadlineExceeded { last_error, .. } => last_error,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Failed { attempts, .. } | RetryError::DeadlineExceeded { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, runs out
/// of attempts, or the deadline passes.
///
/// Each attempt is itself bounded by the remaining deadline.
///
/// ## Arguments
/// * `config` - retry bounds
/// * `op` - operation factory, called once per attempt
/// * `is_retryable` - classifies an error as transient
pub async fn retry_with_backoff<T, E, F, Fut, R>(
    config: &RetryConfig,
    mut op: F,
    is_retryable: R,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
{
    let deadline = Instant::now() + config.deadline;
    let mut attempts = 0u32;
    let mut last_error = None;

    loop {
        let now = Instant::now();
        if now >= deadline {
            return Err(RetryError::DeadlineExceeded {
                last_error,
                attempts,
            });
        }

        attempts += 1;
        let outcome = match tokio::time::timeout(deadline - now, op()).await {
            Ok(outcome) => outcome,
            Err(_) => {
                return Err(RetryError::DeadlineExceeded {
                    last_error,
                    attempts,
                });
            }
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !is_retryable(&error) || attempts >= config.max_attempts {
                    return Err(RetryError::Failed { error, attempts });
                }
                tracing::debug!(attempt = attempts, "Retryable failure, backing off");
                last_error = Some(error);
            }
        }

        let delay = config.delay_after(attempts);
        let remaining = deadline.saturating_duration_since(Instant::now());
        tokio::time::sleep(delay.min(remaining)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(500));
        assert_eq!(config.deadline, Duration::from_secs(15));
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_after(1), Duration::from_millis(500));
        assert_eq!(config.delay_after(2), Duration::from_secs(1));
        assert_eq!(config.delay_after(3), Duration::from_secs(2));
        assert_eq!(config.delay_after(4), Duration::from_secs(4));
        assert_eq!(config.delay_after(10), Duration::from_secs(4));
        assert_eq!(config.delay_after(200), Duration::from_secs(4));
    }

    #[test]
    fn test_fixed_policy() {
        let config = RetryConfig::fixed(Duration::from_secs(1), Duration::from_secs(30));
        assert_eq!(config.delay_after(1), Duration::from_secs(1));
        assert_eq!(config.delay_after(7), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<u32, RetryError<&str>> = retry_with_backoff(
            &RetryConfig::default(),
            || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if n < 3 { Err("transient") } else { Ok(n) }
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), RetryError<&str>> = retry_with_backoff(
            &RetryConfig::default(),
            || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err("fatal") }
            },
            |_| false,
        )
        .await;

        match result {
            Err(RetryError::Failed { error, attempts }) => {
                assert_eq!(error, "fatal");
                assert_eq!(attempts, 1);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempts_are_capped() {
        let result: Result<(), RetryError<&str>> =
            retry_with_backoff(&RetryConfig::default(), || async { Err("down") }, |_| true).await;

        assert_eq!(result.unwrap_err().attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_bounds_a_stalled_attempt() {
        let config = RetryConfig::new(5, Duration::from_millis(10), Duration::from_secs(2));

        let result: Result<(), RetryError<&str>> = retry_with_backoff(
            &config,
            || async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(())
            },
            |_| true,
        )
        .await;

        assert!(matches!(
            result,
            Err(RetryError::DeadlineExceeded { last_error: None, attempts: 1 })
        ));
    }
}
