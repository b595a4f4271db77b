//! Reference anchors and span descriptors for a field's timeline.

use serde::{Deserialize, Serialize};

/// Anchor timestamp a field's spans are measured from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Offset of this anchor from the shared origin, in buckets.
    ///
    /// Zero until the field takes part in global alignment.
    pub idx: u64,
    /// Anchor printed in `iso_format`.
    pub value: String,
    /// Token format `value` is printed in.
    pub iso_format: String,
}

/// A contiguous run of populated buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub range_start: u64,
    pub range_length: u64,
    /// Display flag toggled by the user; starts out `false`.
    #[serde(default)]
    pub reduced: bool,
}

impl Span {
    pub fn new(range_start: u64, range_length: u64) -> Self {
        Self {
            range_start,
            range_length,
            reduced: false,
        }
    }

    /// First bucket past the end of the run.
    pub fn range_end(&self) -> u64 {
        self.range_start + self.range_length
    }

    /// Returns a copy moved by `delta` buckets.
    pub fn shifted(self, delta: u64) -> Self {
        Self {
            range_start: self.range_start + delta,
            ..self
        }
    }
}

/// Output of segmenting one field: its anchor plus its ordered spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeline {
    pub reference: Reference,
    pub spans: Vec<Span>,
}

impl Timeline {
    /// Flips the `reduced` flag of the span at `index`.
    ///
    /// Returns `false` when there is no such span.
    pub fn toggle_reduced(&mut self, index: usize) -> bool {
        match self.spans.get_mut(index) {
            Some(span) => {
                span.reduced = !span.reduced;
                true
            }
            None => false,
        }
    }

    /// Number of buckets covered by spans that are not reduced.
    pub fn active_buckets(&self) -> u64 {
        self.spans
            .iter()
            .filter(|span| !span.reduced)
            .map(|span| span.range_length)
            .sum()
    }

    /// Bucket offset of the first span, if any.
    pub fn first_bucket(&self) -> Option<u64> {
        self.spans.first().map(|span| span.range_start)
    }

    /// Exclusive end of the last span, if any.
    pub fn last_bucket_end(&self) -> Option<u64> {
        self.spans.last().map(Span::range_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Timeline {
        Timeline {
            reference: Reference {
                idx: 0,
                value: "2020-01".to_string(),
                iso_format: "YYYY-MM".to_string(),
            },
            spans: vec![Span::new(0, 3), Span::new(5, 1)],
        }
    }

    #[test]
    fn toggle_reduced_flips_one_span() {
        let mut timeline = sample();
        assert_eq!(timeline.active_buckets(), 4);

        assert!(timeline.toggle_reduced(0));
        assert!(timeline.spans[0].reduced);
        assert!(!timeline.spans[1].reduced);
        assert_eq!(timeline.active_buckets(), 1);

        assert!(timeline.toggle_reduced(0));
        assert_eq!(timeline.active_buckets(), 4);

        assert!(!timeline.toggle_reduced(7));
    }

    #[test]
    fn bucket_bounds() {
        let timeline = sample();
        assert_eq!(timeline.first_bucket(), Some(0));
        assert_eq!(timeline.last_bucket_end(), Some(6));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_string(&sample()).expect("serialize timeline");
        assert!(json.contains(r#""isoFormat":"YYYY-MM""#));
        assert!(json.contains(r#""rangeStart":5"#));
        assert!(json.contains(r#""rangeLength":1"#));
        assert!(json.contains(r#""reduced":false"#));
    }
}
