//! `operator:<f>,angel:<f>` qualification thresholds.

use std::fmt;
use std::str::FromStr;

use bh_core::Person;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub(crate) enum ThresholdError {
    #[error("expected `key:value` pairs, got \"{0}\"")]
    Malformed(String),

    #[error("unknown threshold key \"{0}\" (expected `operator` or `angel`)")]
    UnknownKey(String),

    #[error("threshold `{0}` given more than once")]
    Duplicate(&'static str),

    #[error("missing threshold `{0}`")]
    Missing(&'static str),

    #[error("threshold `{key}` must be a number in [0, 1], got \"{value}\"")]
    InvalidValue { key: &'static str, value: String },
}

/// A lead qualifies when either score reaches its threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Thresholds {
    pub operator: f64,
    pub angel: f64,
}

impl Thresholds {
    pub(crate) fn qualifies(&self, person: &Person) -> bool {
        person.operator_score.value() >= self.operator || person.angel_score.value() >= self.angel
    }
}

impl fmt::Display for Thresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operator:{},angel:{}", self.operator, self.angel)
    }
}

fn parse_value(key: &'static str, raw: &str) -> Result<f64, ThresholdError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| (0.0..=1.0).contains(v))
        .ok_or_else(|| ThresholdError::InvalidValue {
            key,
            value: raw.to_owned(),
        })
}

impl FromStr for Thresholds {
    type Err = ThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut operator = None;
        let mut angel = None;

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once(':')
                .ok_or_else(|| ThresholdError::Malformed(part.to_owned()))?;
            let (name, slot) = match key.trim().to_ascii_lowercase().as_str() {
                "operator" => ("operator", &mut operator),
                "angel" => ("angel", &mut angel),
                other => return Err(ThresholdError::UnknownKey(other.to_owned())),
            };
            if slot.is_some() {
                return Err(ThresholdError::Duplicate(name));
            }
            *slot = Some(parse_value(name, value.trim())?);
        }

        Ok(Self {
            operator: operator.ok_or(ThresholdError::Missing("operator"))?,
            angel: angel.ok_or(ThresholdError::Missing("angel"))?,
        })
    }
}
