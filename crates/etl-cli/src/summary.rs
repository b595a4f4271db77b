use std::collections::BTreeMap;

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use etl_model::{Field, IntervalUnit, SegmentedField, Span, TimeInterval, Timeline};
use etl_timeline::timeline_labels;

use etl_cli::pipeline::AlignOutcome;

/// JSON shape of `align --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AlignReport<'a> {
    anchor: Option<&'a str>,
    fields: BTreeMap<&'a str, &'a Field>,
    coverage: &'a [Span],
}

pub fn print_segment_summary(column: &str, field: &SegmentedField) {
    println!("Column: {column}");
    if let Some(interval) = field.interval {
        println!("Interval: {interval}");
    }
    let (Some(timeline), Some(interval)) = (&field.timeline, field.interval) else {
        eprintln!("No timeline: values are empty or do not all parse under the format.");
        return;
    };
    println!(
        "Reference: {} ({})",
        timeline.reference.value, timeline.reference.iso_format
    );
    println!("{}", span_table(timeline, interval));
    println!(
        "Active buckets: {} of {}",
        timeline.active_buckets(),
        timeline.last_bucket_end().unwrap_or(0)
    );
}

pub fn print_segment_json(field: &SegmentedField) -> Result<()> {
    let field = Field::Timing(field.clone());
    println!("{}", serde_json::to_string_pretty(&field)?);
    Ok(())
}

pub fn print_align_summary(outcome: &AlignOutcome) {
    match &outcome.anchor {
        Some(anchor) => println!(
            "Anchor: {} ({}, {})",
            anchor.name, anchor.moment, anchor.interval
        ),
        None => println!("Anchor: -"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Purpose"),
        header_cell("Interval"),
        header_cell("Reference"),
        header_cell("Idx"),
        header_cell("Spans"),
        header_cell("Active"),
        header_cell("Extent"),
    ]);
    apply_table_style(&mut table);
    for index in 4..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (name, field) in &outcome.fields {
        table.add_row(field_row(name, field));
    }
    println!("{table}");

    for (name, field) in &outcome.fields {
        let Some(timing) = field.as_timing() else {
            continue;
        };
        let (Some(timeline), Some(interval)) = (&timing.timeline, timing.interval) else {
            continue;
        };
        println!();
        println!("{name}:");
        println!("{}", span_table(timeline, interval));
    }

    println!();
    println!("Coverage:");
    println!("{}", coverage_table(&outcome.coverage));
}

pub fn print_align_json(outcome: &AlignOutcome) -> Result<()> {
    let report = AlignReport {
        anchor: outcome.anchor.as_ref().map(|anchor| anchor.name.as_str()),
        fields: outcome
            .fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.as_ref()))
            .collect(),
        coverage: &outcome.coverage,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_units() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Unit")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for unit in IntervalUnit::ALL {
        table.add_row(vec![
            Cell::new(unit.code()).add_attribute(Attribute::Bold),
            Cell::new(unit.name()),
        ]);
    }
    println!("{table}");
}

fn field_row(name: &str, field: &Field) -> Vec<Cell> {
    let name_cell = Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold);
    let Field::Timing(timing) = field else {
        return vec![
            name_cell,
            dim_cell(field.purpose()),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ];
    };
    let interval_cell = match timing.interval {
        Some(interval) => Cell::new(interval),
        None => dim_cell("-"),
    };
    let Some(timeline) = &timing.timeline else {
        return vec![
            name_cell,
            Cell::new(field.purpose()),
            interval_cell,
            Cell::new("not segmented").fg(Color::Yellow),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ];
    };
    let extent = match (timeline.first_bucket(), timeline.last_bucket_end()) {
        (Some(first), Some(end)) => Cell::new(format!("{first}..{end}")),
        _ => dim_cell("-"),
    };
    vec![
        name_cell,
        Cell::new(field.purpose()),
        interval_cell,
        Cell::new(&timeline.reference.value),
        Cell::new(timeline.reference.idx),
        Cell::new(timeline.spans.len()),
        Cell::new(timeline.active_buckets()),
        extent,
    ]
}

fn span_table(timeline: &Timeline, interval: TimeInterval) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Start"),
        header_cell("Length"),
        header_cell("Period"),
    ]);
    apply_table_style(&mut table);
    for index in 0..=2 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let labels = timeline_labels(timeline, interval);
    for (index, (span, label)) in timeline.spans.iter().zip(labels).enumerate() {
        let label_cell = match label {
            Some(label) if span.reduced => dim_cell(format!("{label} (reduced)")),
            Some(label) => Cell::new(label),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            dim_cell(index),
            Cell::new(span.range_start),
            Cell::new(span.range_length),
            label_cell,
        ]);
    }
    table
}

fn coverage_table(coverage: &[Span]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Start"),
        header_cell("End"),
        header_cell("Length"),
    ]);
    apply_table_style(&mut table);
    for index in 0..=2 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    if coverage.is_empty() {
        table.add_row(vec![dim_cell("-"), dim_cell("-"), dim_cell("-")]);
    }
    for span in coverage {
        table.add_row(vec![
            Cell::new(span.range_start),
            Cell::new(span.range_end()),
            Cell::new(span.range_length),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
