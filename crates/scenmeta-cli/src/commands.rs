//! Main commands enum and primary subcommands.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

/// Output encoding for the metadata table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Download the dataset archive, extract it and delete the archive
    Download {
        /// Dataset identifier, naming both `<id>.zip` and the `<id>/` directory
        #[arg(long)]
        dataset_id: Option<String>,
        /// Archive URL (defaults to SCENMETA_DATASET_URL, then the published record)
        #[arg(long)]
        url: Option<String>,
        /// Keep `<id>.zip` after a successful extraction
        #[arg(long)]
        keep_archive: bool,
        /// Suppress the progress bar and summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Compute scenario metadata criteria from an IAMC CSV file
    Metadata {
        /// Scenario CSV (defaults to the scenario file inside the extracted dataset)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the table here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Construct this aggregate variable from its components where missing (repeatable)
        #[arg(long = "fill-missing", value_name = "VARIABLE")]
        fill_missing: Vec<String>,
        /// Extra cell value treated as missing, on top of empty cells and UNDF (repeatable)
        #[arg(long = "na-value", value_name = "TOKEN")]
        na_values: Vec<String>,
        /// Evaluate only these criteria keys (repeatable)
        #[arg(long, value_name = "KEY")]
        only: Vec<String>,
        /// Dataset identifier used to locate the default input
        #[arg(long)]
        dataset_id: Option<String>,
    },

    /// List the registered metadata criteria
    Criteria,

    /// Show resolved paths for the archive and extraction directory
    Paths {
        /// Dataset identifier the paths are derived from
        #[arg(long)]
        dataset_id: Option<String>,
    },
}
