//! Error types for timeline alignment.

use etl_model::TimeInterval;
use thiserror::Error;

/// Problems detected across the timing fields of one request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// A timing field is bucketed differently from the anchor field.
    ///
    /// Offsets for such a field are computed in the anchor's buckets and do
    /// not line up with the field's own spans.
    #[error("field '{field}' uses interval {found}, but anchor field '{anchor}' uses {expected}")]
    IntervalMismatch {
        field: String,
        anchor: String,
        expected: TimeInterval,
        found: TimeInterval,
    },
}

pub type Result<T> = std::result::Result<T, AlignError>;
