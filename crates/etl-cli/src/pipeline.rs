//! Command pipeline with explicit stages.
//!
//! 1. **Ingest**: read a CSV column into levels, or load a JSON request
//! 2. **Segment**: compute each timing field's reference and spans
//! 3. **Align**: check intervals, rebase onto the earliest anchor, merge coverage
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, trace, warn};

use etl_ingest::{TimelineRequest, load_request, read_column_levels};
use etl_model::{Field, FieldSet, Level, SegmentedField, Span, TimeInterval};
use etl_timeline::{
    Anchor, MomentFormat, align, check_intervals, find_anchor, merged_coverage, segment_field,
};

use crate::logging::redact_value;

/// Number of raw values echoed at trace level.
const SAMPLE_SIZE: usize = 5;

/// Input for segmenting one CSV column.
#[derive(Debug, Clone, Copy)]
pub struct SegmentColumnInput<'a> {
    pub path: &'a Path,
    pub column: &'a str,
    pub format: &'a str,
    pub interval: TimeInterval,
    pub null_value: Option<&'a str>,
}

/// Result of aligning a request.
#[derive(Debug, Clone)]
pub struct AlignOutcome {
    pub fields: FieldSet,
    pub anchor: Option<Anchor>,
    pub coverage: Vec<Span>,
}

impl AlignOutcome {
    /// Number of timing fields that ended up with a timeline.
    pub fn segmented_count(&self) -> usize {
        self.fields
            .values()
            .filter_map(|field| field.as_timing())
            .filter(|field| field.is_segmented())
            .count()
    }
}

/// Reads a column and segments it as a single timing field.
///
/// A column whose values do not all parse comes back without a timeline;
/// only an unknown format, an unreadable file, or a missing column is an
/// error.
pub fn segment_column(input: SegmentColumnInput<'_>) -> Result<SegmentedField> {
    let span = info_span!("segment", column = input.column);
    let _guard = span.enter();

    if MomentFormat::compile(input.format).is_none() {
        bail!("unsupported date format '{}'", input.format);
    }
    let levels = read_column_levels(input.path, input.column).with_context(|| {
        format!(
            "read column {} from {}",
            input.column,
            input.path.display()
        )
    })?;
    log_sample(&levels);

    let mut field = SegmentedField::new(levels)
        .with_format(input.format)
        .with_interval(input.interval);
    if let Some(null_value) = input.null_value {
        field = field.with_null_value(null_value);
    }
    let field = segment_field(field);
    match &field.timeline {
        Some(timeline) => info!(
            reference = %timeline.reference.value,
            spans = timeline.spans.len(),
            "segmented column"
        ),
        None => info!("column could not be segmented"),
    }
    Ok(field)
}

/// Recomputes the timeline of every timing field in a request.
pub fn segment_request(request: TimelineRequest) -> FieldSet {
    request
        .fields
        .into_iter()
        .map(|(name, field)| {
            let field = match field {
                Field::Timing(timing) => {
                    let timing = segment_field(timing);
                    debug!(
                        field = %name,
                        segmented = timing.is_segmented(),
                        "segmented timing field"
                    );
                    Field::Timing(timing)
                }
                other => other,
            };
            (name, Arc::new(field))
        })
        .collect()
}

/// Checks intervals, aligns, and merges coverage for a segmented field set.
///
/// # Errors
///
/// Fails on an interval mismatch unless `allow_mixed_intervals` is set, in
/// which case the mismatch is only logged.
pub fn align_fields(fields: &FieldSet, allow_mixed_intervals: bool) -> Result<AlignOutcome> {
    if let Err(error) = check_intervals(fields) {
        if !allow_mixed_intervals {
            return Err(error).context("timing fields must share one interval");
        }
        warn!(%error, "aligning fields with mixed intervals");
    }

    let anchor = find_anchor(fields);
    let aligned = align(fields);
    let coverage = merged_coverage(&aligned);
    info!(
        anchor = anchor.as_ref().map_or("-", |anchor| anchor.name.as_str()),
        fields = aligned.len(),
        coverage_runs = coverage.len(),
        "aligned request"
    );
    Ok(AlignOutcome {
        fields: aligned,
        anchor,
        coverage,
    })
}

/// Loads, segments, and aligns a request file.
pub fn align_request(path: &Path, allow_mixed_intervals: bool) -> Result<AlignOutcome> {
    let span = info_span!("align", request = %path.display());
    let _guard = span.enter();

    let request =
        load_request(path).with_context(|| format!("load request {}", path.display()))?;
    let fields = segment_request(request);
    align_fields(&fields, allow_mixed_intervals)
}

fn log_sample(levels: &[Level]) {
    for level in levels.iter().take(SAMPLE_SIZE) {
        trace!(value = redact_value(&level.value), count = level.count, "level");
    }
}
