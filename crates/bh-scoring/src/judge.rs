//! The external judgment capability for borderline profiles.

use async_trait::async_trait;
use bh_core::{RawProfile, Score};
use serde::{Deserialize, Serialize};

use crate::error::JudgeError;

/// One per-profile verdict from a [`Judge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub operator_score: f64,
    pub angel_score: f64,
    #[serde(default)]
    pub evidence: Vec<String>,
}

impl Judgment {
    /// Check both scores are finite and clamp them into `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::InvalidScore`] for a NaN or infinite score.
    pub fn validated(self, source_id: &str) -> Result<Self, JudgeError> {
        let invalid = |field| JudgeError::InvalidScore {
            source_id: source_id.to_owned(),
            field,
        };
        if !self.operator_score.is_finite() {
            return Err(invalid("operator_score"));
        }
        if !self.angel_score.is_finite() {
            return Err(invalid("angel_score"));
        }
        Ok(Self {
            operator_score: Score::new(self.operator_score).value(),
            angel_score: Score::new(self.angel_score).value(),
            evidence: self.evidence,
        })
    }
}

/// Resolves profiles the heuristics could not classify.
///
/// Implementations must return exactly one [`Judgment`] per input profile,
/// in input order.
#[async_trait]
pub trait Judge: Send + Sync {
    /// # Errors
    ///
    /// Returns [`JudgeError`] if the batch cannot be judged.
    async fn judge(&self, batch: &[RawProfile]) -> Result<Vec<Judgment>, JudgeError>;
}
