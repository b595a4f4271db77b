//! Data model for the timeline engine.
//!
//! - [`interval`]: bucket units, shorthand codes, and [`TimeInterval`]
//! - [`level`]: distinct column values with occurrence counts
//! - [`timeline`]: [`Reference`] anchors and [`Span`] runs
//! - [`field`]: request fields split into timing and non-timing

pub mod error;
pub mod field;
pub mod interval;
pub mod level;
pub mod timeline;

pub use error::{InvalidUnitError, ModelError, Result};
pub use field::{Field, FieldSet, Purpose, SegmentedField, UntimedField};
pub use interval::{IntervalUnit, TimeInterval, canonical_unit};
pub use level::Level;
pub use timeline::{Reference, Span, Timeline};
