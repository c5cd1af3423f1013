//! Errors raised while constructing domain values.
//!
//! These are the construction-time failures: a value outside its closed set,
//! a malformed ARN or schedule, an invalid tag. `BuildError` wraps them so the
//! caller learns which declaration they came from.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    #[error("ARN '{0}' must start with 'arn:'")]
    MissingPrefix(String),

    #[error("ARN '{0}' must have six colon-separated parts")]
    TooFewParts(String),

    #[error("ARN '{arn}' has an empty {part}")]
    EmptyPart { arn: String, part: &'static str },

    #[error("ARN '{arn}' belongs to service '{actual}', expected '{expected}'")]
    WrongService {
        arn: String,
        expected: &'static str,
        actual: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("schedule expression '{0}' must be rate(...) or cron(...)")]
    UnknownForm(String),

    #[error("rate expression '{0}' must be 'rate(<value> <unit>)'")]
    MalformedRate(String),

    #[error("rate value in '{0}' must be a positive integer")]
    InvalidRateValue(String),

    #[error("rate unit '{unit}' is not valid for value {value}")]
    InvalidRateUnit { value: u32, unit: String },

    #[error("cron expression '{0}' must have six fields")]
    MalformedCron(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag key must be 1..=128 characters, got {0}")]
    KeyLength(usize),

    #[error("tag value for '{key}' must be at most 256 characters, got {len}")]
    ValueLength { key: String, len: usize },

    #[error("tag key '{0}' uses the reserved 'aws:' prefix")]
    ReservedPrefix(String),

    #[error("tag key '{0}' appears more than once")]
    DuplicateKey(String),

    #[error("at most 50 tags are allowed, got {0}")]
    TooMany(usize),
}

/// A string that is not one of the allowed values of a closed option type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for {field}; allowed: {}", .allowed.join(", "))]
pub struct InvalidOptionValue {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}
