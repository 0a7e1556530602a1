//! Batches borderline profiles through a [`Judge`].

use bh_core::RawProfile;

use crate::error::JudgeError;
use crate::judge::{Judge, Judgment};

/// Profiles per judge request unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Judge `profiles` in batches of `batch_size`, pairing each profile with its
/// verdict in input order.
///
/// A batch whose response length differs from its request length fails the
/// whole call; there is no fallback to heuristic scores.
///
/// # Errors
///
/// - [`JudgeError::InvalidBatchSize`] if `batch_size` is zero.
/// - [`JudgeError::Misaligned`] if a batch response has the wrong length.
/// - Any error returned by the judge itself.
pub async fn classify_borderline(
    judge: &dyn Judge,
    profiles: Vec<RawProfile>,
    batch_size: usize,
) -> Result<Vec<(RawProfile, Judgment)>, JudgeError> {
    if batch_size == 0 {
        return Err(JudgeError::InvalidBatchSize);
    }

    let batch_count = profiles.len().div_ceil(batch_size);
    let mut judged = Vec::with_capacity(profiles.len());

    for (idx, batch) in profiles.chunks(batch_size).enumerate() {
        tracing::info!(
            batch = idx + 1,
            batches = batch_count,
            size = batch.len(),
            "submitting borderline batch for judgment"
        );

        let judgments = judge.judge(batch).await?;
        if judgments.len() != batch.len() {
            tracing::error!(
                batch = idx + 1,
                expected = batch.len(),
                got = judgments.len(),
                "judge response misaligned with request"
            );
            return Err(JudgeError::Misaligned {
                expected: batch.len(),
                got: judgments.len(),
            });
        }

        for (profile, judgment) in batch.iter().zip(judgments) {
            let judgment = judgment.validated(&profile.source_id)?;
            judged.push((profile.clone(), judgment));
        }
    }

    Ok(judged)
}
