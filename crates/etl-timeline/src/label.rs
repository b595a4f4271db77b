//! Calendar bounds and display labels for spans.

use chrono::NaiveDateTime;

use etl_model::{Span, TimeInterval, Timeline};

use crate::calendar::bucket_start;
use crate::moment::MomentFormat;

/// Start of the first and of the last bucket a span covers.
///
/// Works before and after alignment: the reference sits `idx` buckets past
/// the origin the span offsets are measured from.
pub fn span_bounds(
    timeline: &Timeline,
    interval: TimeInterval,
    span: &Span,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let reference = &timeline.reference;
    let anchor = MomentFormat::compile(&reference.iso_format)?.parse(&reference.value)?;
    let idx = i64::try_from(reference.idx).ok()?;
    let first = i64::try_from(span.range_start).ok()?.checked_sub(idx)?;
    let last = first.checked_add(i64::try_from(span.range_length).ok()? - 1)?;
    Some((
        bucket_start(anchor, first, interval)?,
        bucket_start(anchor, last, interval)?,
    ))
}

/// Human-readable label, e.g. `2020-01 – 2020-03`, or a single date for a
/// one-bucket span.
pub fn span_label(timeline: &Timeline, interval: TimeInterval, span: &Span) -> Option<String> {
    let printer = MomentFormat::compile(&timeline.reference.iso_format)?;
    let (start, end) = span_bounds(timeline, interval, span)?;
    if span.range_length <= 1 {
        Some(printer.print(&start))
    } else {
        Some(format!("{} – {}", printer.print(&start), printer.print(&end)))
    }
}

/// Labels for every span of a timeline, in order.
pub fn timeline_labels(timeline: &Timeline, interval: TimeInterval) -> Vec<Option<String>> {
    timeline
        .spans
        .iter()
        .map(|span| span_label(timeline, interval, span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_model::{IntervalUnit, Reference};

    fn timeline(value: &str, idx: u64, spans: Vec<Span>) -> Timeline {
        Timeline {
            reference: Reference {
                idx,
                value: value.to_string(),
                iso_format: "YYYY-MM".to_string(),
            },
            spans,
        }
    }

    #[test]
    fn local_spans_label_from_reference() {
        let monthly = TimeInterval::new(IntervalUnit::Month, 1).unwrap();
        let timeline = timeline("2020-01", 0, vec![Span::new(0, 3), Span::new(5, 1)]);
        assert_eq!(
            timeline_labels(&timeline, monthly),
            vec![
                Some("2020-01 – 2020-03".to_string()),
                Some("2020-06".to_string())
            ]
        );
    }

    #[test]
    fn aligned_spans_label_the_same_dates() {
        let monthly = TimeInterval::new(IntervalUnit::Month, 1).unwrap();
        let timeline = timeline("2020-03", 2, vec![Span::new(2, 2)]);
        assert_eq!(
            span_label(&timeline, monthly, &timeline.spans[0]).as_deref(),
            Some("2020-03 – 2020-04")
        );
    }

    #[test]
    fn multi_unit_buckets_label_bucket_starts() {
        let quarterly = TimeInterval::new(IntervalUnit::Month, 3).unwrap();
        let timeline = timeline("2020-01", 0, vec![Span::new(0, 2)]);
        assert_eq!(
            span_label(&timeline, quarterly, &timeline.spans[0]).as_deref(),
            Some("2020-01 – 2020-04")
        );
    }

    #[test]
    fn unparsable_reference_has_no_label() {
        let monthly = TimeInterval::new(IntervalUnit::Month, 1).unwrap();
        let timeline = timeline("March", 0, vec![Span::new(0, 1)]);
        assert!(span_label(&timeline, monthly, &timeline.spans[0]).is_none());
    }
}
