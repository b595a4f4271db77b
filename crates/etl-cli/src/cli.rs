//! CLI argument definitions for the span timeline tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "etl-span",
    version,
    about = "Segment timing columns into spans and align them on one time axis",
    long_about = "Segment timing columns into spans and align them on one time axis.\n\n\
                  Reads a date/time column from CSV and folds its values into runs of\n\
                  populated buckets, or aligns every timing field of a JSON request onto\n\
                  the earliest field's reference."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw column values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Segment one timing column of a CSV file into spans.
    Segment(SegmentArgs),

    /// Segment and align every timing field of a JSON request.
    Align(AlignArgs),

    /// List the recognized interval unit codes.
    Units,
}

#[derive(Parser)]
pub struct SegmentArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Column holding the date/time values.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Token format of the values, e.g. YYYY-MM or DD/MM/YYYY.
    #[arg(long = "format", value_name = "FMT")]
    pub format: String,

    /// Interval unit code (y, M, w, d, h, m, s, ms).
    #[arg(long = "unit", value_name = "CODE")]
    pub unit: String,

    /// Number of units per bucket.
    #[arg(long = "count", value_name = "N", default_value_t = 1)]
    pub count: u32,

    /// Value substituted for empty cells before parsing.
    #[arg(long = "null-value", value_name = "V")]
    pub null_value: Option<String>,

    /// Print the segmented field as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AlignArgs {
    /// JSON request with a `fields` map.
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// Align even when timing fields use different intervals.
    ///
    /// Offsets of a mismatched field are counted in the anchor field's
    /// buckets and will not line up with its own spans.
    #[arg(long = "allow-mixed-intervals")]
    pub allow_mixed_intervals: bool,

    /// Print the aligned request as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
