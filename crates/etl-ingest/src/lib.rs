//! Source ingestion for the timeline engine.
//!
//! # Features
//!
//! - **Column Reading**: read one column out of a CSV file with a header row
//! - **Levels**: collapse raw values into distinct levels with counts
//! - **Requests**: load JSON timeline requests into a shared field set
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use etl_ingest::{load_request, read_column_levels};
//!
//! let levels = read_column_levels(Path::new("visits.csv"), "VISITDT")?;
//! let fields = load_request(Path::new("request.json"))?.into_field_set();
//! ```

mod column;
mod error;
mod levels;
mod request;

// === Error Types ===
pub use error::{IngestError, Result};

// === Column Reading ===
pub use column::{MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_column_values};

// === Levels ===
pub use levels::{levels_from_values, read_column_levels};

// === Requests ===
pub use request::{TimelineRequest, load_request, parse_request};
