//! Error types for the timing model.

use thiserror::Error;

/// An interval-unit shorthand outside the recognized set.
///
/// This is a configuration error: the code was authored by whoever set up the
/// request, not produced by the data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interval unit '{code}'")]
pub struct InvalidUnitError {
    pub code: String,
}

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(transparent)]
    InvalidUnit(#[from] InvalidUnitError),

    /// Interval multiplier must be at least one.
    #[error("interval count must be greater than zero")]
    InvalidIntervalCount,

    /// A non-timing field was declared with the timing purpose.
    #[error("field with purpose '{purpose}' cannot carry a timeline")]
    PurposeMismatch { purpose: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
