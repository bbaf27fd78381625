//! Command-line parsing for the shop lot price dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the ingest/statistics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lotdash", version, about = "Shop Lot Transaction Price Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a sheet, print the price summary, and optionally plot/export.
    Stats(StatsArgs),
    /// Launch the interactive TUI dashboard.
    ///
    /// This uses the same ingest and statistics pipeline as `lotdash stats`,
    /// but renders results in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Options for the one-shot summary report.
#[derive(Debug, Parser, Clone)]
pub struct StatsArgs {
    /// Transaction sheet (CSV export). Prompts with a picker when omitted.
    #[arg(short = 'f', long = "file", value_name = "SHEET")]
    pub file: Option<PathBuf>,

    /// Weight for transactions in 2020 and later.
    #[arg(long, default_value_t = 0.5)]
    pub w_recent: f64,

    /// Weight for transactions in 2000-2019.
    #[arg(long, default_value_t = 0.3)]
    pub w_mid: f64,

    /// Weight for transactions in 1999 and earlier.
    #[arg(long, default_value_t = 0.2)]
    pub w_old: f64,

    /// Render an ASCII trend plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the yearly-median series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full summary (median, weighted average, series) to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

/// Options for the interactive dashboard.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Transaction sheet (CSV export) to load on startup.
    #[arg(short = 'f', long = "file", value_name = "SHEET")]
    pub file: Option<PathBuf>,
}
