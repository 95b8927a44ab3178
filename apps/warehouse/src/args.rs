//! Command-line options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Where readings are written.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Newline-delimited JSON (stdout unless --out is given).
    #[default]
    #[value(name = "jsonl", alias = "json")]
    JsonLines,
    /// CSV file; requires --out.
    Csv,
    /// SQLite database; requires --out and the `sqlite` feature.
    Sqlite,
    /// Keep readings in memory and discard them at exit.
    Memory,
    /// Discard every reading.
    #[value(alias = "none")]
    Null,
}

#[derive(Clone, Debug, Default, PartialEq, Parser)]
#[command(
    name = "warehouse",
    version,
    about = "AGV fleet telemetry simulator",
    after_help = "Logging is controlled with RUST_LOG (default: info) and goes to stderr."
)]
pub struct Args {
    /// JSON fleet configuration (defaults used if omitted).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reading sink.
    #[arg(short, long, value_enum, default_value_t = SinkKind::JsonLines)]
    pub sink: SinkKind,

    /// Output file.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Stop each vehicle after N ticks.
    #[arg(short, long, value_name = "N")]
    pub ticks: Option<u64>,

    /// RNG seed for a reproducible run.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Fleet size.
    #[arg(short = 'n', long, value_name = "N")]
    pub vehicles: Option<usize>,

    /// Tick period in milliseconds.
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}
