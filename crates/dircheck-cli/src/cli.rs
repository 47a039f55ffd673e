//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dircheck: consistency checks for biobank directory snapshots
#[derive(Parser)]
#[command(name = "dircheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run checks against a directory snapshot
    Check {
        /// Path to the directory snapshot (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip a check by name (repeatable)
        #[arg(long, value_name = "CHECK")]
        disable: Vec<String>,

        /// Drop warnings below this severity
        #[arg(long)]
        min_severity: Option<SeverityChoice>,

        /// Exit with status 2 when any ERROR is reported
        #[arg(long)]
        strict: bool,
    },

    /// List available checks
    ListChecks,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SeverityChoice {
    Warning,
    Error,
}

impl From<SeverityChoice> for dircheck::Severity {
    fn from(choice: SeverityChoice) -> Self {
        match choice {
            SeverityChoice::Warning => dircheck::Severity::Warning,
            SeverityChoice::Error => dircheck::Severity::Error,
        }
    }
}
