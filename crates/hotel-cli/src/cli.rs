//! CLI argument definitions for the dashboard renderer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use hotel_model::DEFAULT_PREVIEW_ROWS;

/// Default output page, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "hotel_booking_report.html";

#[derive(Parser)]
#[command(
    name = "hotel-report",
    version,
    about = "Hotel Booking Analysis - render the reservation dashboard",
    long_about = "Load the hotel reservation CSV, clean it, and render the dashboard\n\
                  as a self-contained HTML page with inline SVG charts.\n\n\
                  By default the data file 'hotel_bookings 2.csv' is read from the\n\
                  folder that contains this executable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the dashboard page once.
    Render(RenderArgs),

    /// Re-render the dashboard whenever the data file changes.
    Watch(WatchArgs),
}

#[derive(Args, Clone)]
pub struct RenderArgs {
    /// Reservation CSV (default: 'hotel_bookings 2.csv' beside the executable).
    #[arg(long = "data", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Output HTML page.
    #[arg(long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also write the dashboard data as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Rows shown in the dataset preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,
}

#[derive(Args, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Polling interval for data file changes, in milliseconds.
    #[arg(long = "interval-ms", value_name = "MS", default_value_t = 1000)]
    pub interval_ms: u64,
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
