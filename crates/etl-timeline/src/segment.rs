//! Span segmentation of a single timing field.
//!
//! Every value is parsed and the distinct moments are sorted. The whole
//! buckets elapsed between each moment and the next form a diff sequence,
//! which is folded into [`Span`]s:
//!
//! ```text
//! values   2020-01 2020-02 2020-03 . . 2020-06
//! diffs          1       1       3
//! spans    [start 0, length 3]         [start 5, length 1]
//! ```
//!
//! A diff is truncated to whole buckets, so values that sit inside a bucket
//! only open a new one once a full bucket separates them from the previous
//! value.

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use etl_model::{Level, Reference, SegmentedField, Span, TimeInterval, Timeline};

use crate::calendar::bucket_index;
use crate::format::canonical_format;
use crate::moment::MomentFormat;

/// Segments a field's levels into a reference anchor and ordered spans.
///
/// Returns `None` when the field is not ready: no non-empty values, a format
/// the parser does not understand, or any value that does not parse strictly
/// under `format`. Empty values are ignored.
pub fn segment(levels: &[Level], format: &str, interval: TimeInterval) -> Option<Timeline> {
    segment_values(levels.iter().map(|level| level.value.as_str()), format, interval)
}

/// Recomputes a field's timeline from its levels, format, interval, and
/// null placeholder.
///
/// The field always comes back; when it cannot be segmented its timeline is
/// cleared rather than left stale.
pub fn segment_field(field: SegmentedField) -> SegmentedField {
    let (Some(format), Some(interval)) = (field.format.clone(), field.interval) else {
        debug!(
            has_format = field.format.is_some(),
            has_interval = field.interval.is_some(),
            "timing field not configured; skipping segmentation"
        );
        return SegmentedField {
            timeline: None,
            ..field
        };
    };
    let null_value = field.null_value.as_deref().unwrap_or("");
    let values = field.levels.iter().map(|level| {
        if level.value.trim().is_empty() {
            null_value
        } else {
            level.value.as_str()
        }
    });
    let timeline = segment_values(values, &format, interval);
    SegmentedField { timeline, ..field }
}

fn segment_values<'a>(
    values: impl Iterator<Item = &'a str>,
    format: &str,
    interval: TimeInterval,
) -> Option<Timeline> {
    let Some(parser) = MomentFormat::compile(format) else {
        debug!(format, "unsupported date format");
        return None;
    };
    let iso_format = canonical_format(format);
    let Some(printer) = MomentFormat::compile(&iso_format) else {
        debug!(format = %iso_format, "unsupported canonical date format");
        return None;
    };

    let mut moments = Vec::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match parser.parse(value) {
            Some(moment) => moments.push(moment),
            None => {
                debug!(format, "value does not match date format");
                trace!(value, "unparsable date value");
                return None;
            }
        }
    }

    moments.sort_unstable();
    moments.dedup();
    let Some(&anchor) = moments.first() else {
        debug!("no date values to segment");
        return None;
    };

    let diffs = consecutive_diffs(&moments, interval);
    let spans = fold_spans(&diffs);
    trace!(
        moments = moments.len(),
        spans = spans.len(),
        %interval,
        "segmented timing field"
    );

    Some(Timeline {
        reference: Reference {
            idx: 0,
            value: printer.print(&anchor),
            iso_format,
        },
        spans,
    })
}

/// Whole buckets elapsed between each pair of consecutive sorted moments.
fn consecutive_diffs(moments: &[NaiveDateTime], interval: TimeInterval) -> Vec<u64> {
    moments
        .windows(2)
        .map(|pair| bucket_index(pair[0], pair[1], interval).unwrap_or(0))
        .collect()
}

/// Folds a diff sequence into contiguous runs, starting at bucket 0.
///
/// The fold carries the finished spans plus the start and length of the run
/// still open. `0` is a repeated bucket, `1` extends the run, and a larger
/// gap closes the open run; the next run begins `gap` buckets after the last
/// bucket of the closed one. The open run is flushed at the end, which is
/// also what keeps an isolated trailing bucket. No diffs means one moment,
/// so one single-bucket span.
pub(crate) fn fold_spans(diffs: &[u64]) -> Vec<Span> {
    let (mut spans, start, length) = diffs.iter().copied().fold(
        (Vec::new(), 0_u64, 1_u64),
        |(mut spans, start, length), diff| match diff {
            0 => (spans, start, length),
            1 => (spans, start, length + 1),
            gap => {
                spans.push(Span::new(start, length));
                (spans, start + length - 1 + gap, 1)
            }
        },
    );
    spans.push(Span::new(start, length));
    spans
}
