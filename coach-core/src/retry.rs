//! Store write retry utilities.
//!
//! Provides configurable retry logic with exponential backoff for store
//! operations, in particular compare-and-swap writes that lose a race.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::AppError;

/// Configuration for retry behavior.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Initial backoff duration before first retry.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Whether to add jitter to backoff duration.
    pub add_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the specified max retries.
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Create a config with no retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Create a config for quick retries (smaller backoffs).
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            add_jitter: true,
        }
    }

    /// Calculate backoff duration for a given attempt.
    fn backoff_duration(&self, attempt: u32) -> Duration {
        let backoff =
            self.initial_backoff.as_millis() as f64 * self.backoff_multiplier.powi(attempt as i32);
        let backoff_ms = backoff.min(self.max_backoff.as_millis() as f64) as u64;

        let mut duration = Duration::from_millis(backoff_ms);

        if self.add_jitter {
            // Add up to 25% jitter
            let jitter = (backoff_ms as f64 * 0.25 * rand_jitter()) as u64;
            duration += Duration::from_millis(jitter);
        }

        duration
    }
}

/// Simple pseudo-random jitter (0.0 to 1.0) without external dependencies.
fn rand_jitter() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}

/// Determines if an error is worth retrying.
///
/// Conflicts are retryable because the caller re-reads current state and
/// recomputes before the next attempt; store errors may be transient I/O.
pub fn is_retryable(error: &AppError) -> bool {
    matches!(error, AppError::Conflict(_) | AppError::StoreError(_))
}

/// Determines if an error is definitely not retryable.
pub fn is_permanent_failure(error: &AppError) -> bool {
    matches!(
        error,
        AppError::InvalidInput(_)
            | AppError::NotFound(_)
            | AppError::DataQuality(_)
            | AppError::ConfigError(_)
    )
}

/// Execute a store operation with retry logic.
///
/// # Arguments
/// * `config` - Retry configuration
/// * `operation_name` - Name of the operation for logging
/// * `f` - The async function that performs the store operation
///
/// # Example
/// ```ignore
/// let result = retry_store_call(
///     &RetryConfig::default(),
///     "mark_cycle_paid",
///     || async {
///         store.update_billing_state(tenant_id, student_id, revision, &patch).await
///     }
/// ).await;
/// ```
pub async fn retry_store_call<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    f: F,
) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => {
                if attempt > 0 {
                    info!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        "Store call succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(error) => {
                // Check if we should retry
                if attempt >= config.max_retries {
                    warn!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        error = %error,
                        "Store call failed after max retries"
                    );
                    return Err(error);
                }

                if is_permanent_failure(&error) {
                    warn!(
                        operation = operation_name,
                        error = %error,
                        "Store call failed with permanent error, not retrying"
                    );
                    return Err(error);
                }

                if !is_retryable(&error) {
                    warn!(
                        operation = operation_name,
                        error = %error,
                        "Store call failed with non-retryable error"
                    );
                    return Err(error);
                }

                // Calculate backoff and sleep
                let backoff = config.backoff_duration(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    error = %error,
                    backoff_ms = backoff.as_millis(),
                    "Store call failed, retrying after backoff"
                );

                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}
