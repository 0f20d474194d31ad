//! Validation errors raised while assembling an upgrade request.
//!
//! Every failure is local and detected before anything reaches the
//! transport. A [`ValidationError`] pairs the logical field path the caller
//! supplied with a [`ValidationErrorKind`] that carries the raw value that
//! was rejected.

use thiserror::Error;

/// What went wrong with a single input value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationErrorKind {
    /// Neither an ISO 8601 duration nor a whole number of milliseconds
    #[error("'{0}' is neither an ISO 8601 duration nor a number of milliseconds")]
    InvalidDurationFormat(String),

    /// Duration (or one of its ISO 8601 components) is below zero
    #[error("duration '{0}' must not be negative")]
    NegativeDuration(String),

    /// Duration does not fit in the millisecond range
    #[error("duration '{0}' exceeds the representable millisecond range")]
    DurationOverflow(String),

    /// Percentage threshold outside `[0, 100]`
    #[error("percentage {0} must be between 0 and 100")]
    PercentageOutOfRange(i64),

    /// Health policy map entry with an empty key
    #[error("health policy key must not be empty")]
    EmptyPolicyKey,

    /// Health policy map key supplied more than once
    #[error("health policy key '{0}' is specified more than once")]
    DuplicateHealthPolicyKey(String),

    /// Replica set check timeout outside the configured bound
    #[error("timeout {value} must be between 0 and {max} seconds")]
    TimeoutOutOfRange { value: i64, max: u64 },
}

impl ValidationErrorKind {
    /// Attribute this failure to a field.
    pub fn at(self, field: impl Into<String>) -> ValidationError {
        ValidationError {
            field: field.into(),
            kind: self,
        }
    }
}

/// A validation failure attributed to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    field: String,
    kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        kind.at(field)
    }

    /// Logical path of the offending field, e.g.
    /// `ClusterHealthPolicy.MaxPercentUnhealthyNodes`.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// Prefix the field path with the name of the enclosing object.
    ///
    /// Map entries are addressed as `[key]` and attach without a dot.
    pub fn within(mut self, parent: &str) -> Self {
        self.field = if self.field.is_empty() {
            parent.to_string()
        } else if self.field.starts_with('[') {
            format!("{}{}", parent, self.field)
        } else {
            format!("{}.{}", parent, self.field)
        };
        self
    }
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

/// An enumerated option did not match any of its known names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}
