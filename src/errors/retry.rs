use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::classification::ErrorClassification;
use super::types::FetchError;

impl ErrorClassification {
    /// Calculate the retry delay for this error classification based on the
    /// current attempt number (0-indexed).
    ///
    /// - RateLimitError: 5s + (attempt * 5s), capped at `cap`
    /// - Default: exponential backoff 2^attempt + random jitter (0-1s), capped at `cap`
    pub fn retry_delay(&self, attempt: u32, cap: Duration) -> Duration {
        let delay = match self.error_type {
            "RateLimitError" => Duration::from_secs(5 + attempt as u64 * 5),
            _ => {
                let base: f64 = 2.0_f64.powi(attempt as i32);
                let jitter: f64 = rand::random::<f64>();
                Duration::from_secs_f64(base + jitter)
            }
        };
        delay.min(cap)
    }
}

/// Retry configuration for source fetches. Clients never retry on their own;
/// the aggregator wraps each call with this policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff_cap_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff_cap_secs: 8,
        }
    }
}

impl RetryConfig {
    pub fn disabled() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }
}

/// Execute a fetch with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries. Every attempt calls `factory` again, so nothing from
/// a failed attempt is reused.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = config.max_retries + 1;
    let cap = Duration::from_secs(config.backoff_cap_secs);
    let mut attempt = 0;

    loop {
        let err = match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => e,
        };

        let classification = err.classify();
        if !classification.retryable {
            warn!(
                operation = operation_name,
                error_type = classification.error_type,
                "Non-retryable error, failing immediately"
            );
            return Err(err);
        }
        if attempt + 1 >= max_attempts {
            warn!(
                operation = operation_name,
                attempt = attempt + 1,
                max = max_attempts,
                "Max retries exhausted"
            );
            return Err(err);
        }

        let delay = classification.retry_delay(attempt, cap);
        warn!(
            operation = operation_name,
            attempt = attempt + 1,
            max = max_attempts,
            error_type = classification.error_type,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying after error"
        );

        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourceKind;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const CAP: Duration = Duration::from_secs(8);

    #[test]
    fn test_retry_delay_rate_limit() {
        let class = ErrorClassification { error_type: "RateLimitError", retryable: true };
        assert_eq!(class.retry_delay(0, CAP), Duration::from_secs(5));
        assert_eq!(class.retry_delay(5, CAP), CAP); // capped
    }

    #[test]
    fn test_retry_delay_default_exponential() {
        let class = ErrorClassification { error_type: "TimeoutError", retryable: true };
        let d0 = class.retry_delay(0, CAP);
        let d1 = class.retry_delay(1, CAP);
        // Attempt 0: 2^0 + jitter = ~1-2s
        assert!(d0.as_secs_f64() >= 1.0 && d0.as_secs_f64() < 2.0);
        // Attempt 1: 2^1 + jitter = ~2-3s
        assert!(d1.as_secs_f64() >= 2.0 && d1.as_secs_f64() < 3.0);
        assert_eq!(class.retry_delay(10, CAP), CAP);
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let result = with_retry("test", &RetryConfig::default(), || async {
            Ok::<_, FetchError>(42)
        }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig { max_retries: 3, backoff_cap_secs: 1 };

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(FetchError::Parse {
                    origin: SourceKind::Severity,
                    message: "not json".into(),
                })
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_retry_recovers_after_transient_failure() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();
        let config = RetryConfig { max_retries: 2, backoff_cap_secs: 1 };

        let result = with_retry("test", &config, || {
            let attempts = attempts_clone.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(FetchError::Timeout { origin: SourceKind::Severity, after_secs: 12 })
                } else {
                    Ok("payload")
                }
            }
        }).await;

        assert_eq!(result.unwrap(), "payload");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_with_retry_disabled_makes_single_attempt() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &RetryConfig::disabled(), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(FetchError::HttpStatus { origin: SourceKind::Severity, code: 503 })
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
