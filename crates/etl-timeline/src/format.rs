//! Canonical date formats and unit codes.
//!
//! Sources describe year-month columns in several orderings and separators.
//! Timelines are always printed year first with `-` separators so that the
//! printed anchors sort the same way the moments do.

pub use etl_model::canonical_unit;

/// Known non-canonical patterns and the canonical form each maps to.
const FORMAT_ALIASES: &[(&str, &str)] = &[
    ("MM-YYYY", "YYYY-MM"),
    ("MM/YYYY", "YYYY-MM"),
    ("MM.YYYY", "YYYY-MM"),
    ("YYYY_MM", "YYYY-MM"),
    ("YYYY/MM", "YYYY-MM"),
    ("YYYY.MM", "YYYY-MM"),
    ("YYYYMM", "YYYY-MM"),
    ("DD-MM-YYYY", "YYYY-MM-DD"),
    ("DD/MM/YYYY", "YYYY-MM-DD"),
    ("DD.MM.YYYY", "YYYY-MM-DD"),
    ("YYYY_MM_DD", "YYYY-MM-DD"),
    ("YYYY/MM/DD", "YYYY-MM-DD"),
];

/// Maps a recognized non-canonical date pattern to its canonical form.
///
/// Formats outside the alias table are returned unchanged.
pub fn canonical_format(format: &str) -> String {
    FORMAT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == format)
        .map_or(format, |(_, canonical)| *canonical)
        .to_string()
}
