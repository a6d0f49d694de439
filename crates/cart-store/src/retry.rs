//! Retry policies for persistence writes.

use std::future::Future;
use std::time::Duration;

use cart_kv::{KvError, KvResult};
use serde::{Deserialize, Serialize};

/// Backoff strategy between retry attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// No delay between retries.
    None,
    /// Fixed delay between retries.
    Fixed {
        /// Delay in milliseconds.
        delay_ms: u64,
    },
    /// Exponential backoff with base and max.
    Exponential {
        /// Initial delay in milliseconds.
        base_ms: u64,
        /// Maximum delay in milliseconds.
        max_ms: u64,
    },
}

impl BackoffStrategy {
    /// Calculate delay for a given attempt number (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fixed { delay_ms } => Duration::from_millis(*delay_ms),
            Self::Exponential { base_ms, max_ms } => {
                let multiplier = 2u64.saturating_pow(attempt);
                let delay = base_ms.saturating_mul(multiplier);
                Duration::from_millis(delay.min(*max_ms))
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        Self::Exponential {
            base_ms: 50,
            max_ms: 500,
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_attempts: u32,
    /// Backoff strategy.
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    /// Create a new retry policy.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::default(),
        }
    }

    /// Create a policy with no retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
        }
    }

    /// Set backoff strategy.
    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Check if a failure on `attempt` (0-indexed) should be retried.
    pub fn should_retry(&self, error: &KvError, attempt: u32) -> bool {
        attempt < self.max_attempts && error.is_transient()
    }

    /// Run `op` until it succeeds, fails permanently, or retries run out.
    ///
    /// Each retry is logged at `warn` with the label `what`.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> KvResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = KvResult<T>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(&e, attempt) => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    tracing::warn!(
                        operation = what,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying after failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_exponential_backoff() {
        let backoff = BackoffStrategy::Exponential {
            base_ms: 50,
            max_ms: 300,
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(50));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(3), Duration::from_millis(300));
        assert_eq!(backoff.delay_for_attempt(64), Duration::from_millis(300));
    }

    #[test]
    fn test_fixed_and_none() {
        assert_eq!(
            BackoffStrategy::Fixed { delay_ms: 7 }.delay_for_attempt(5),
            Duration::from_millis(7)
        );
        assert_eq!(BackoffStrategy::None.delay_for_attempt(5), Duration::ZERO);
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::new(2);
        let transient = KvError::Store("busy".into());
        let permanent = KvError::InvalidKey(String::new());

        assert!(policy.should_retry(&transient, 0));
        assert!(policy.should_retry(&transient, 1));
        assert!(!policy.should_retry(&transient, 2));
        assert!(!policy.should_retry(&permanent, 0));
        assert!(!RetryPolicy::none().should_retry(&transient, 0));
    }

    #[test]
    fn test_backoff_toml_shape() {
        let policy: RetryPolicy = toml::from_str(
            r#"
            max_attempts = 4
            backoff = { kind = "fixed", delay_ms = 20 }
            "#,
        )
        .unwrap();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.backoff, BackoffStrategy::Fixed { delay_ms: 20 });
    }

    #[tokio::test]
    async fn test_run_recovers_from_transient_failures() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(3).with_backoff(BackoffStrategy::None);

        let result = policy
            .run("write", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(KvError::Store("busy".into()))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_run_gives_up() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(1).with_backoff(BackoffStrategy::None);

        let result: KvResult<()> = policy
            .run("write", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(KvError::Store("down".into()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_run_does_not_retry_permanent_errors() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5).with_backoff(BackoffStrategy::None);

        let result: KvResult<()> = policy
            .run("write", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(KvError::InvalidKey("bad".into()))
            })
            .await;

        assert!(matches!(result, Err(KvError::InvalidKey(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
