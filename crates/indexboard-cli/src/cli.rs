//! CLI argument definitions for indexboard.
//!
//! This module contains the command-line interface structure using Clap.
//! The CLI renders a one-shot dashboard view for a chosen global index and
//! can list the built-in catalog.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Render the dashboard for one index over a date window |
//! | `indices` | List the built-in index catalog |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--offline` | `false` | Serve deterministic offline data |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//!
//! # Examples
//!
//! ```bash
//! # Render the default view (NIFTY 50 from 2023-01-01 to today)
//! indexboard show
//!
//! # Pick an index and window
//! indexboard show "S&P 500" --start 2023-01-01 --end 2023-06-30
//!
//! # Machine-readable output without touching the network
//! indexboard show "DAX (Germany)" --offline --format json --pretty
//!
//! # See which names the catalog accepts
//! indexboard indices
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// 🌍 indexboard - Global stock index dashboard
///
/// Track major global indices (NIFTY 50, S&P 500, FTSE 100, ...) with a
/// summary overview, a close-price chart, and descriptive statistics,
/// powered by Yahoo Finance.
#[derive(Debug, Parser)]
#[command(
    name = "indexboard",
    author,
    version,
    about = "Global stock index dashboard",
    long_about = "indexboard renders a dashboard view for one of ten major global stock \
indices: a market summary overview, a close-price chart, and descriptive statistics over \
the daily history of a chosen date window.\n\
\n\
  • Built-in catalog of ten index display names\n\
  • Daily OHLCV history from the Yahoo chart API\n\
  • Summary snapshot from the Yahoo quoteSummary API\n\
  • Offline mode with deterministic data for demos and tests\n\
\n\
Use 'indexboard <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - table: dashboard layout for the terminal (default)
    /// - json: single JSON envelope
    /// - ndjson: the same envelope on one line
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve deterministic offline data instead of calling Yahoo.
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = 10_000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Dashboard layout for terminal display.
    Table,
    /// Single JSON envelope output.
    Json,
    /// Newline-delimited JSON (the envelope on one line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📊 Render the dashboard for one index.
    ///
    /// Fetches daily history for the window plus the current market summary
    /// and renders overview, chart, and statistics. When the window holds no
    /// data the dashboard shows a single warning instead.
    ///
    /// # Examples
    ///
    ///   indexboard show
    ///   indexboard show "S&P 500" --start 2023-01-01 --end 2023-06-30
    ///   indexboard show "Nikkei 225 (Japan)" --offline
    Show(ShowArgs),

    /// 📋 List the built-in index catalog.
    ///
    /// Prints the display names accepted by `show` together with their
    /// Yahoo symbols.
    Indices,
}

/// Arguments for the `show` command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Index display name from the built-in catalog.
    ///
    /// Quote names that contain spaces, e.g. "S&P 500". See `indexboard
    /// indices` for the accepted names.
    #[arg(default_value = "NIFTY 50")]
    pub index: String,

    /// Start of the date window (YYYY-MM-DD), inclusive.
    #[arg(long, default_value = "2023-01-01")]
    pub start: String,

    /// End of the date window (YYYY-MM-DD), inclusive. Defaults to today
    /// (UTC).
    #[arg(long)]
    pub end: Option<String>,
}
