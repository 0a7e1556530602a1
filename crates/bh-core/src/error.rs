use thiserror::Error;

/// Construction-time validation failures for data-model values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid URL \"{value}\": {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("invalid ISO-8601 timestamp \"{value}\"")]
    InvalidTimestamp { value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
