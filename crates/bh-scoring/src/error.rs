use thiserror::Error;

/// Errors returned by a [`crate::Judge`] or the borderline classifier.
///
/// Every variant is fatal for the batch it occurred in.
#[derive(Debug, Error)]
pub enum JudgeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("judge returned status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("judge returned {got} results for a batch of {expected} profiles")]
    Misaligned { expected: usize, got: usize },

    #[error("judge returned non-finite {field} for profile {source_id}")]
    InvalidScore { source_id: String, field: &'static str },

    #[error("batch size must be at least 1")]
    InvalidBatchSize,
}
