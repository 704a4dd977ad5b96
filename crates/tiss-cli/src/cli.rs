//! CLI argument definitions for the TISS financial transformer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tiss-finance",
    version,
    about = "TISS financial reconciliation - reshape billing batches into per-claim views",
    long_about = "Reshape a TISS billing batch and its flat line items into a nested\n\
                  per-claim financial view with subtotals, batch totals and a\n\
                  deduplicated professional roster."
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

    /// Allow patient and professional names in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the financial view and write it as JSON.
    Visualize(VisualizeArgs),

    /// Print per-claim subtotals, batch totals and the professional roster.
    Summary(SummaryArgs),

    /// Report orphan items, unclassified expenses and other batch anomalies.
    Inspect(InspectArgs),
}

/// Input files shared by every command.
#[derive(Args)]
pub struct BatchArgs {
    /// JSON file with the batch record.
    #[arg(long = "lote", value_name = "FILE")]
    pub lote: PathBuf,

    /// JSON file with the line items (an array, or an object with an `items` array).
    #[arg(long = "items", value_name = "FILE")]
    pub items: PathBuf,
}

#[derive(Args)]
pub struct VisualizeArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Refuse to write output when the batch has inspection findings.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Also write the per-claim summary as CSV.
    #[arg(long = "csv", value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub batch: BatchArgs,

    /// Exit with an error when any finding is reported.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print findings as JSON instead of a table.
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
