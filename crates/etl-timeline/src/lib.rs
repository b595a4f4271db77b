//! Timeline engine for timing fields.
//!
//! Turns a column's raw date/time values into compact span descriptors and
//! reconciles the per-column timelines of a request onto one shared axis.
//!
//! - **format**: canonical date patterns and interval unit codes
//! - **moment**: strict token-format parsing and printing
//! - **calendar**: whole-unit elapsed time and bucket arithmetic
//! - **segment**: reference anchor and span runs for one field
//! - **align**: global alignment, interval checks, merged coverage
//! - **label**: calendar bounds and display labels for spans
//!
//! # Example
//!
//! ```
//! use etl_model::{Level, TimeInterval};
//! use etl_timeline::segment;
//!
//! let levels = ["2020-01", "2020-02", "2020-03", "2020-06"]
//!     .into_iter()
//!     .map(|value| Level::new(value, 1))
//!     .collect::<Vec<_>>();
//! let interval = TimeInterval::from_code("M", 1).unwrap();
//!
//! let timeline = segment(&levels, "YYYY-MM", interval).unwrap();
//! assert_eq!(timeline.reference.value, "2020-01");
//! assert_eq!(timeline.spans.len(), 2);
//! ```

pub mod align;
pub mod calendar;
pub mod error;
pub mod format;
pub mod label;
pub mod moment;
pub mod segment;

pub use align::{Anchor, align, check_intervals, find_anchor, merged_coverage};
pub use error::{AlignError, Result};
pub use format::{canonical_format, canonical_unit};
pub use label::{span_bounds, span_label, timeline_labels};
pub use moment::{MomentFormat, parse_moment};
pub use segment::{segment, segment_field};
