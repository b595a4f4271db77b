//! Global alignment of timing fields onto one shared origin.
//!
//! Each timing field is segmented on its own, so span offsets are measured
//! from that field's earliest value. Alignment picks the field with the
//! globally earliest anchor and re-expresses every other field's offsets in
//! buckets from that anchor, making spans from different source files
//! positionally comparable.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use etl_model::{Field, FieldSet, SegmentedField, Span, TimeInterval, Timeline};

use crate::calendar::bucket_index;
use crate::error::{AlignError, Result};
use crate::moment::parse_moment;

/// The field whose reference is the shared origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub name: String,
    pub moment: NaiveDateTime,
    pub interval: TimeInterval,
}

/// A segmented timing field with its parsed reference moment.
struct Anchored<'a> {
    name: &'a str,
    field: &'a SegmentedField,
    timeline: &'a Timeline,
    interval: TimeInterval,
    moment: NaiveDateTime,
}

fn anchored_fields(fields: &FieldSet) -> Vec<Anchored<'_>> {
    let mut anchored = Vec::new();
    for (name, field) in fields {
        let Field::Timing(timing) = field.as_ref() else {
            continue;
        };
        let Some(timeline) = timing.timeline.as_ref() else {
            debug!(field = %name, "timing field has no timeline yet");
            continue;
        };
        let Some(interval) = timing.interval else {
            debug!(field = %name, "timing field has no interval; left unaligned");
            continue;
        };
        let reference = &timeline.reference;
        let Some(moment) = parse_moment(&reference.value, &reference.iso_format) else {
            warn!(
                field = %name,
                format = %reference.iso_format,
                "reference does not parse under its own format; field left unaligned"
            );
            continue;
        };
        anchored.push(Anchored {
            name,
            field: timing,
            timeline,
            interval,
            moment,
        });
    }
    anchored
}

/// Earliest anchored field and its interval. Ties keep the first field in
/// iteration order.
fn earliest<'a, 'b>(anchored: &'b [Anchored<'a>]) -> Option<(&'b Anchored<'a>, TimeInterval)> {
    anchored
        .iter()
        .fold(None, |best: Option<&Anchored<'a>>, candidate| match best {
            Some(current) if current.moment <= candidate.moment => best,
            _ => Some(candidate),
        })
        .map(|entry| (entry, entry.interval))
}

/// Finds the field every timing field will be aligned to.
pub fn find_anchor(fields: &FieldSet) -> Option<Anchor> {
    let anchored = anchored_fields(fields);
    earliest(&anchored).map(|(entry, interval)| Anchor {
        name: entry.name.to_string(),
        moment: entry.moment,
        interval,
    })
}

/// Rebases every segmented timing field onto the earliest anchor.
///
/// Each field's `reference.idx` becomes its offset from the anchor, in the
/// anchor field's buckets, and its spans move by the same amount. Fields that
/// are not timing, not yet segmented, without an interval, or already at the
/// right offset are returned as the same shared value. Re-aligning an aligned set changes
/// nothing.
pub fn align(fields: &FieldSet) -> FieldSet {
    let anchored = anchored_fields(fields);
    let Some((anchor, interval)) = earliest(&anchored) else {
        debug!("no segmented timing fields; nothing to align");
        return fields.clone();
    };
    debug!(
        anchor = %anchor.name,
        reference = %anchor.timeline.reference.value,
        %interval,
        timing_fields = anchored.len(),
        "aligning timing fields"
    );

    let mut aligned = fields.clone();
    for entry in &anchored {
        if entry.interval != interval {
            warn!(
                field = %entry.name,
                anchor = %anchor.name,
                expected = %interval,
                found = %entry.interval,
                "interval differs from anchor field; offsets use the anchor interval"
            );
        }
        // Anchored fields are never earlier than the anchor.
        let delta = bucket_index(anchor.moment, entry.moment, interval).unwrap_or(0);
        if delta == entry.timeline.reference.idx {
            continue;
        }
        let rebased = SegmentedField {
            timeline: Some(shift_timeline(entry.timeline, delta)),
            ..entry.field.clone()
        };
        aligned.insert(entry.name.to_string(), Arc::new(Field::Timing(rebased)));
    }
    aligned
}

/// Moves a timeline from its current offset to `delta`.
///
/// Spans are stored on the shared axis, so the previous offset is taken off
/// before the new one is applied.
fn shift_timeline(timeline: &Timeline, delta: u64) -> Timeline {
    let previous = timeline.reference.idx;
    let spans = timeline
        .spans
        .iter()
        .map(|span| Span {
            range_start: span.range_start.saturating_sub(previous) + delta,
            ..*span
        })
        .collect();
    let mut reference = timeline.reference.clone();
    reference.idx = delta;
    Timeline { reference, spans }
}

/// Checks that every segmented timing field shares the anchor's interval.
///
/// # Errors
///
/// Returns [`AlignError::IntervalMismatch`] for the first field, in
/// iteration order, whose interval differs from the anchor field's.
pub fn check_intervals(fields: &FieldSet) -> Result<()> {
    let anchored = anchored_fields(fields);
    let Some((anchor, expected)) = earliest(&anchored) else {
        return Ok(());
    };
    for entry in &anchored {
        if entry.interval != expected {
            return Err(AlignError::IntervalMismatch {
                field: entry.name.to_string(),
                anchor: anchor.name.to_string(),
                expected,
                found: entry.interval,
            });
        }
    }
    Ok(())
}

/// Union of the non-reduced spans of every timing field on the shared axis.
///
/// Overlapping and adjacent runs are joined. Call on an aligned set; on an
/// unaligned one every field's offsets are still local.
pub fn merged_coverage(fields: &FieldSet) -> Vec<Span> {
    let mut spans: Vec<Span> = fields
        .values()
        .filter_map(|field| field.as_timing())
        .filter_map(|field| field.timeline.as_ref())
        .flat_map(|timeline| timeline.spans.iter().copied())
        .filter(|span| !span.reduced)
        .collect();
    spans.sort_by_key(|span| span.range_start);

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.range_start <= last.range_end() => {
                let end = last.range_end().max(span.range_end());
                last.range_length = end - last.range_start;
            }
            _ => merged.push(Span::new(span.range_start, span.range_length)),
        }
    }
    merged
}
