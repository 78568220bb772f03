//! CLI argument definitions for the survey explorer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use svy_analysis::{
    DEFAULT_ALPHA, DEFAULT_BINS, DEFAULT_MAX_DISTINCT, DEFAULT_PREVIEW_ROWS, DEFAULT_THRESHOLD,
};

#[derive(Parser)]
#[command(
    name = "svy",
    version,
    about = "Survey explorer - summaries, t-tests and multiple-choice segment comparison",
    long_about = "Explore a survey export (CSV or Excel).\n\n\
                  Prints a data preview and summary table, histograms, a two-group\n\
                  t-test, and detects multiple-choice option columns to compare\n\
                  their selection rates across respondent segments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Prefix log lines with a timestamp (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Allow respondent-level cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Result format written to stdout.
    #[arg(long = "output", value_enum, default_value = "table", global = true)]
    pub output: OutputArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// List columns with fill ratio, cardinality and multiple-choice verdict.
    Columns(ColumnsArgs),

    /// Show the data preview, summary table and numeric column means.
    Describe(DescribeArgs),

    /// Bin a numeric column into an equal-width histogram.
    Histogram(HistogramArgs),

    /// Compare a numeric column between the two groups of a categorical column.
    Ttest(TtestArgs),

    /// Detect multiple-choice options and report their selection rates.
    Choices(ChoicesArgs),

    /// Mean of a numeric column per segment, largest first.
    Segments(SegmentsArgs),

    /// Run every panel of the dashboard in order.
    Report(ReportArgs),
}

/// The survey file to load.
#[derive(Args)]
pub struct InputArgs {
    /// CSV file (any case of `.csv`) or spreadsheet workbook.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Multiple-choice detection tunables.
#[derive(Args)]
pub struct ClassifierArgs {
    /// Fill ratio below which a column may be an option (exclusive, 0..1).
    #[arg(long = "threshold", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Distinct-value count at which a column stops being an option (exclusive).
    #[arg(long = "max-distinct", default_value_t = DEFAULT_MAX_DISTINCT)]
    pub max_distinct: usize,

    /// Only consider non-numeric columns as options.
    #[arg(long = "categorical-only")]
    pub categorical_only: bool,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,
}

#[derive(Args)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of preview rows.
    #[arg(long = "rows", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,
}

#[derive(Args)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Numeric column to plot (default: first numeric column).
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,

    /// Number of equal-width bins.
    #[arg(long = "bins", default_value_t = DEFAULT_BINS)]
    pub bins: usize,
}

#[derive(Args)]
pub struct TtestArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Categorical grouping column (default: first categorical column).
    #[arg(long = "group", value_name = "COLUMN")]
    pub group: Option<String>,

    /// Numeric value column (default: first numeric column).
    #[arg(long = "value", value_name = "COLUMN")]
    pub value: Option<String>,

    /// Significance level.
    #[arg(long = "alpha", default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,
}

#[derive(Args)]
pub struct ChoicesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    /// Option columns to summarise (repeatable; default: every detected option).
    #[arg(long = "option", value_name = "COLUMN")]
    pub options: Vec<String>,

    /// Categorical column to compare selection rates across.
    #[arg(long = "segment", value_name = "COLUMN")]
    pub segment: Option<String>,
}

#[derive(Args)]
pub struct SegmentsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Categorical column defining the segments.
    #[arg(long = "segment", value_name = "COLUMN")]
    pub segment: String,

    /// Numeric column to average.
    #[arg(long = "value", value_name = "COLUMN")]
    pub value: String,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    /// Number of preview rows.
    #[arg(long = "rows", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,

    /// Histogram column (default: first numeric column).
    #[arg(long = "histogram", value_name = "COLUMN")]
    pub histogram: Option<String>,

    /// Number of histogram bins.
    #[arg(long = "bins", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// t-test grouping column (default: first categorical column).
    #[arg(long = "group", value_name = "COLUMN")]
    pub group: Option<String>,

    /// t-test value column (default: first numeric column).
    #[arg(long = "value", value_name = "COLUMN")]
    pub value: Option<String>,

    /// Significance level.
    #[arg(long = "alpha", default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Option columns (repeatable; default: every detected option).
    #[arg(long = "option", value_name = "COLUMN")]
    pub options: Vec<String>,

    /// Segment column for the option comparison (default: first categorical column).
    #[arg(long = "segment", value_name = "COLUMN")]
    pub segment: Option<String>,
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

/// Result output choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}
