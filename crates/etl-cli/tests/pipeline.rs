//! Integration tests for the pipeline module.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use etl_cli::pipeline::{SegmentColumnInput, align_request, segment_column};
use etl_model::{IntervalUnit, Span, TimeInterval};

const VISITS: &str = "SUBJ,VISITDT\nS1,2020-01\nS2,2020-02\nS3,\nS4,2020-03\nS5,2020-06\nS6,2020-01\n";

const REQUEST: &str = r#"{
    "fields": {
        "adverse_event": {
            "purpose": "timing",
            "levels": [
                { "value": "2020-04", "count": 2 },
                { "value": "2020-03", "count": 1 }
            ],
            "format": "YYYY-MM",
            "interval": { "unit": "M", "count": 1 }
        },
        "enrolled": {
            "purpose": "timing",
            "levels": [{ "value": "01/2020", "count": 5 }],
            "format": "MM/YYYY",
            "interval": { "unit": "M", "count": 1 }
        },
        "site": {
            "purpose": "subject",
            "levels": [{ "value": "A", "count": 5 }]
        }
    }
}"#;

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn monthly() -> TimeInterval {
    TimeInterval::new(IntervalUnit::Month, 1).unwrap()
}

fn input<'a>(path: &'a Path, null_value: Option<&'a str>) -> SegmentColumnInput<'a> {
    SegmentColumnInput {
        path,
        column: "VISITDT",
        format: "YYYY-MM",
        interval: monthly(),
        null_value,
    }
}

#[test]
fn test_segment_column_skips_empty_cells() {
    let file = temp_file(VISITS);

    let field = segment_column(input(file.path(), None)).unwrap();

    let timeline = field.timeline.unwrap();
    assert_eq!(timeline.reference.value, "2020-01");
    assert_eq!(timeline.reference.idx, 0);
    assert_eq!(timeline.spans, vec![Span::new(0, 3), Span::new(5, 1)]);
}

#[test]
fn test_segment_column_fills_empty_cells_with_null_value() {
    let file = temp_file(VISITS);

    let field = segment_column(input(file.path(), Some("2020-04"))).unwrap();

    let timeline = field.timeline.unwrap();
    assert_eq!(timeline.spans, vec![Span::new(0, 4), Span::new(5, 1)]);
}

#[test]
fn test_segment_column_with_unparsable_value_has_no_timeline() {
    let file = temp_file("VISITDT\n2020-01\nJan 2020\n");

    let field = segment_column(input(file.path(), None)).unwrap();

    assert!(field.timeline.is_none());
    assert_eq!(field.levels.len(), 2);
}

#[test]
fn test_segment_column_missing_column() {
    let file = temp_file("SUBJ\nS1\n");

    let err = segment_column(input(file.path(), None)).unwrap_err();

    assert!(format!("{err:#}").contains("column 'VISITDT' not found"));
}

#[test]
fn test_align_request_rebases_onto_earliest_field() {
    let file = temp_file(REQUEST);

    let outcome = align_request(file.path(), false).unwrap();

    assert_eq!(outcome.anchor.as_ref().unwrap().name, "enrolled");
    assert_eq!(outcome.segmented_count(), 2);
    let summary: Vec<_> = outcome
        .fields
        .iter()
        .filter_map(|(name, field)| {
            let timeline = field.as_timing()?.timeline.as_ref()?;
            Some(serde_json::json!({
                "field": name,
                "reference": timeline.reference,
                "spans": timeline.spans,
            }))
        })
        .collect();
    insta::assert_json_snapshot!(summary, @r#"
    [
      {
        "field": "adverse_event",
        "reference": {
          "idx": 2,
          "isoFormat": "YYYY-MM",
          "value": "2020-03"
        },
        "spans": [
          {
            "rangeLength": 2,
            "rangeStart": 2,
            "reduced": false
          }
        ]
      },
      {
        "field": "enrolled",
        "reference": {
          "idx": 0,
          "isoFormat": "YYYY-MM",
          "value": "2020-01"
        },
        "spans": [
          {
            "rangeLength": 1,
            "rangeStart": 0,
            "reduced": false
          }
        ]
      }
    ]
    "#);
    assert_eq!(outcome.coverage, vec![Span::new(0, 1), Span::new(2, 2)]);
}

#[test]
fn test_align_request_rejects_invalid_json() {
    let file = temp_file(r#"{ "fields": { "x": { "purpose": "sometimes" } } }"#);

    let err = align_request(file.path(), false).unwrap_err();

    assert!(format!("{err:#}").contains("load request"));
}
