// SPDX-License-Identifier: MIT OR Apache-2.0
//! Generic exponential-backoff-with-jitter retry loop.
//!
//! Used by `casecraft-provider` for transport retries against a single
//! provider and by `casecraft-scheduler` for the invalid-output retry path.

use casecraft_error::CaseCraftError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// Retry/backoff configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial one. `0` means no
    /// retries.
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    #[serde(with = "duration_millis")]
    pub base_delay: Duration,
    /// Maximum delay cap for exponential backoff.
    #[serde(with = "duration_millis")]
    pub max_delay: Duration,
    /// Overall wall-clock budget across all attempts.
    #[serde(with = "duration_millis")]
    pub overall_timeout: Duration,
    /// Jitter factor in `[0.0, 1.0]`. `0.0` = no jitter, `1.0` = full jitter.
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            overall_timeout: Duration::from_secs(60),
            jitter_factor: 0.5,
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(val: &Duration, ser: S) -> Result<S::Ok, S::Error> {
        val.as_millis().serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
        let ms: u64 = u64::deserialize(de)?;
        Ok(Duration::from_millis(ms))
    }
}

/// Record of one failed attempt.
#[derive(Debug, Clone)]
pub struct RetryAttempt {
    /// Zero-indexed attempt number.
    pub attempt: u32,
    /// Error message from the attempt.
    pub error: String,
    /// Backoff delay applied before the next attempt.
    pub delay: Duration,
}

/// Metadata captured across a whole retry sequence.
#[derive(Debug, Clone, Default)]
pub struct RetryMetadata {
    /// Total attempts made, including the successful one (if any).
    pub total_attempts: u32,
    /// Records of each failed attempt.
    pub failed_attempts: Vec<RetryAttempt>,
    /// Wall-clock duration spanning all attempts.
    pub total_duration: Duration,
}

/// Outcome of a retry-enabled operation.
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// The successfully produced value.
    pub value: T,
    /// Metadata about the attempts leading up to success.
    pub metadata: RetryMetadata,
}

/// Compute the backoff delay for a zero-indexed `attempt`, applying jitter
/// by shaving a random amount (up to `jitter_factor` of the nominal delay)
/// off the top.
#[must_use]
pub fn compute_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let exp = 2u64.saturating_pow(attempt);
    let delay_ms = (config.base_delay.as_millis() as u64).saturating_mul(exp);
    let capped_ms = delay_ms.min(config.max_delay.as_millis() as u64);

    let jitter_factor = config.jitter_factor.clamp(0.0, 1.0);
    if jitter_factor > 0.0 && capped_ms > 0 {
        let jitter_range = (capped_ms as f64 * jitter_factor) as u64;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..=jitter_range)
        } else {
            0
        };
        Duration::from_millis(capped_ms.saturating_sub(jitter))
    } else {
        Duration::from_millis(capped_ms)
    }
}

/// Generic retry loop. Calls `op` up to `max_retries + 1` times with
/// exponential backoff, returning the first successful result along with
/// metadata about the failed attempts that preceded it.
///
/// `retryable` decides whether a given error should trigger another
/// attempt; a non-retryable error returns immediately.
pub async fn retry_async<T, F, Fut>(
    config: &RetryConfig,
    mut op: F,
    retryable: fn(&CaseCraftError) -> bool,
) -> Result<RetryOutcome<T>, CaseCraftError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CaseCraftError>>,
{
    let start = Instant::now();
    let max_attempts = config.max_retries + 1;
    let mut failed_attempts = Vec::new();

    for attempt in 0..max_attempts {
        if start.elapsed() >= config.overall_timeout {
            tracing::warn!(attempt, "retry overall timeout exceeded");
            return Err(CaseCraftError::Cancelled);
        }

        tracing::debug!(attempt, max_attempts, "attempting operation");

        match op().await {
            Ok(value) => {
                let total_duration = start.elapsed();
                tracing::debug!(attempt, ?total_duration, "operation succeeded");
                return Ok(RetryOutcome {
                    value,
                    metadata: RetryMetadata {
                        total_attempts: attempt + 1,
                        failed_attempts,
                        total_duration,
                    },
                });
            }
            Err(err) => {
                let is_last = attempt + 1 >= max_attempts;

                if !retryable(&err) {
                    tracing::debug!(%err, "non-retryable error, giving up");
                    return Err(err);
                }
                if is_last {
                    tracing::warn!(%err, attempt, "max retries exhausted");
                    return Err(err);
                }

                let delay = compute_delay(config, attempt);
                tracing::warn!(%err, attempt, ?delay, "retryable error, backing off");
                failed_attempts.push(RetryAttempt {
                    attempt,
                    error: err.to_string(),
                    delay,
                });

                let remaining = config.overall_timeout.saturating_sub(start.elapsed());
                if delay > remaining {
                    return Err(err);
                }
                tokio::time::sleep(delay).await;
            }
        }
    }

    unreachable!("loop always returns within max_attempts iterations")
}

#[cfg(test)]
mod tests {
    use super::*;
    use casecraft_error::{CaseCraftError, TransportErrorKind};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            overall_timeout: Duration::from_secs(5),
            jitter_factor: 0.0,
        }
    }

    fn retryable(err: &CaseCraftError) -> bool {
        matches!(
            err,
            CaseCraftError::ProviderTransport { kind, .. } if kind.is_retryable()
        )
    }

    #[tokio::test]
    async fn succeeds_on_first_try_with_no_failed_attempts() {
        let outcome = retry_async(
            &fast_config(3),
            || async { Ok::<_, CaseCraftError>(42) },
            retryable,
        )
        .await
        .unwrap();
        assert_eq!(outcome.value, 42);
        assert_eq!(outcome.metadata.total_attempts, 1);
        assert!(outcome.metadata.failed_attempts.is_empty());
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let calls = AtomicU32::new(0);
        let outcome = retry_async(
            &fast_config(3),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(CaseCraftError::ProviderTransport {
                            provider: "glm".into(),
                            kind: TransportErrorKind::Transient { status: Some(503) },
                        })
                    } else {
                        Ok(99)
                    }
                }
            },
            retryable,
        )
        .await
        .unwrap();
        assert_eq!(outcome.value, 99);
        assert_eq!(outcome.metadata.total_attempts, 3);
        assert_eq!(outcome.metadata.failed_attempts.len(), 2);
    }

    #[tokio::test]
    async fn non_retryable_error_returns_immediately() {
        let calls = AtomicU32::new(0);
        let err = retry_async(
            &fast_config(3),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<i32, _>(CaseCraftError::ProviderFatal {
                        provider: "glm".into(),
                        reason: "bad api key".into(),
                    })
                }
            },
            retryable,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CaseCraftError::ProviderFatal { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausting_retries_returns_last_error() {
        let err = retry_async(
            &fast_config(2),
            || async {
                Err::<i32, _>(CaseCraftError::ProviderTransport {
                    provider: "glm".into(),
                    kind: TransportErrorKind::Transient { status: Some(500) },
                })
            },
            retryable,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CaseCraftError::ProviderTransport { .. }));
    }

    #[test]
    fn delay_never_exceeds_max_delay() {
        let config = RetryConfig {
            max_retries: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            overall_timeout: Duration::from_secs(60),
            jitter_factor: 0.0,
        };
        for attempt in 0..10 {
            assert!(compute_delay(&config, attempt) <= Duration::from_millis(500));
        }
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let config = RetryConfig {
            jitter_factor: 0.0,
            ..fast_config(1)
        };
        assert_eq!(compute_delay(&config, 0), compute_delay(&config, 0));
    }
}
