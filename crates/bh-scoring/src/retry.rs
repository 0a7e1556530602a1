//! Back-off policy for judge requests.
//!
//! Same policy as harvesting: network errors, 429 and 5xx are retried after
//! `base * 2^attempt` seconds. Anything the judge actually answered with is
//! final.

use std::future::Future;
use std::time::Duration;

use crate::error::JudgeError;

fn is_retriable(err: &JudgeError) -> bool {
    match err {
        JudgeError::Http(_) => true,
        JudgeError::UnexpectedStatus { status } => *status == 429 || *status >= 500,
        JudgeError::Deserialize { .. }
        | JudgeError::Misaligned { .. }
        | JudgeError::InvalidScore { .. }
        | JudgeError::InvalidBatchSize => false,
    }
}

/// Wait before retry number `attempt + 1`.
fn backoff_delay(base_secs: u64, attempt: u32) -> Duration {
    Duration::from_secs(base_secs.saturating_mul(2u64.saturating_pow(attempt)))
}

/// Run `operation` once, then up to `max_retries` more times while it fails
/// with a retriable error.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, JudgeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, JudgeError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Err(err) if attempt < max_retries && is_retriable(&err) => {
                let delay = backoff_delay(backoff_base_secs, attempt);
                tracing::warn!(
                    retry = attempt + 1,
                    max_retries,
                    delay_secs = delay.as_secs(),
                    error = %err,
                    "judge request failed, backing off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
