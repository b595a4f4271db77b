use anyhow::{Context, Result};

use etl_cli::pipeline::{AlignOutcome, SegmentColumnInput, align_request, segment_column};
use etl_model::{SegmentedField, TimeInterval};

use crate::cli::{AlignArgs, SegmentArgs};
use crate::summary::{
    print_align_json, print_align_summary, print_segment_json, print_segment_summary,
    print_units,
};

pub fn run_segment(args: &SegmentArgs) -> Result<SegmentedField> {
    let interval = TimeInterval::from_code(&args.unit, args.count)
        .with_context(|| format!("invalid interval {} x {}", args.count, args.unit))?;
    let field = segment_column(SegmentColumnInput {
        path: &args.csv,
        column: &args.column,
        format: &args.format,
        interval,
        null_value: args.null_value.as_deref(),
    })?;
    if args.json {
        print_segment_json(&field)?;
    } else {
        print_segment_summary(&args.column, &field);
    }
    Ok(field)
}

pub fn run_align(args: &AlignArgs) -> Result<AlignOutcome> {
    let outcome = align_request(&args.request, args.allow_mixed_intervals)?;
    if args.json {
        print_align_json(&outcome)?;
    } else {
        print_align_summary(&outcome);
    }
    Ok(outcome)
}

pub fn run_units() {
    print_units();
}
