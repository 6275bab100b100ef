//! CLI argument parsing for lettermerge
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level, --log-json

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use lettermerge_core::partition::parse_partition;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

/// Lettermerge - merge per-student letters, report the run, archive the inputs
#[derive(Parser, Debug)]
#[command(name = "lettermerge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Pipeline root containing Input/, Output/ and Archive/
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter (e.g. `info`, `lettermerge_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create sample admission and scholarship letters under Input/
    Seed,

    /// Discover input letters and combine them per student
    Combine {
        /// Run date (YYYYMMDD); defaults to today
        #[arg(long, value_parser = parse_run_date)]
        date: Option<NaiveDate>,
    },

    /// Write the report for a run date's output partition
    Report {
        /// Run date (YYYYMMDD); defaults to today
        #[arg(long, value_parser = parse_run_date)]
        date: Option<NaiveDate>,
    },

    /// Move every input file into the archive
    Archive,

    /// Combine, report and archive in one go
    Run {
        /// Run date (YYYYMMDD); defaults to today
        #[arg(long, value_parser = parse_run_date)]
        date: Option<NaiveDate>,

        /// Create the sample input before running
        #[arg(long)]
        seed: bool,
    },
}

/// Parse a `--date` value
pub fn parse_run_date(s: &str) -> Result<NaiveDate, String> {
    parse_partition(s).map_err(|_| format!("expected a date as YYYYMMDD, got '{}'", s))
}
