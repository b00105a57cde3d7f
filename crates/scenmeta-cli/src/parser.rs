//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Download the scenario dataset and derive scenario metadata from it.
#[derive(Parser)]
#[command(name = "scenmeta")]
#[command(about = "Download the scenario dataset and compute scenario metadata")]
#[command(version)]
pub struct Cli {
    /// Directory holding the archive and the extracted dataset
    /// (defaults to SCENMETA_WORK_DIR, then the current directory)
    #[arg(long = "work-dir", global = true)]
    pub work_dir: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["scenmeta", "download", "--work-dir", "/tmp/data", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.work_dir.as_deref(), Some("/tmp/data"));
        assert!(matches!(cli.command, Some(Commands::Download { .. })));
    }

    #[test]
    fn test_download_flags() {
        let cli = Cli::parse_from([
            "scenmeta",
            "download",
            "--dataset-id",
            "Other_2024",
            "--url",
            "https://example.org/Other_2024.zip",
            "--keep-archive",
            "--quiet",
        ]);
        let Some(Commands::Download {
            dataset_id,
            url,
            keep_archive,
            quiet,
        }) = cli.command
        else {
            panic!("expected download command");
        };
        assert_eq!(dataset_id.as_deref(), Some("Other_2024"));
        assert_eq!(url.as_deref(), Some("https://example.org/Other_2024.zip"));
        assert!(keep_archive);
        assert!(quiet);
    }

    #[test]
    fn test_metadata_defaults() {
        let cli = Cli::parse_from(["scenmeta", "metadata"]);
        let Some(Commands::Metadata {
            input,
            output,
            format,
            fill_missing,
            na_values,
            only,
            ..
        }) = cli.command
        else {
            panic!("expected metadata command");
        };
        assert!(input.is_none());
        assert!(output.is_none());
        assert_eq!(format, OutputFormat::Csv);
        assert!(fill_missing.is_empty());
        assert!(na_values.is_empty());
        assert!(only.is_empty());
    }

    #[test]
    fn test_metadata_repeated_flags() {
        let cli = Cli::parse_from([
            "scenmeta",
            "metadata",
            "--format",
            "json",
            "--fill-missing",
            "Final Energy|Industry",
            "--fill-missing",
            "Final Energy|Residential and Commercial",
            "--na-value",
            "n/a",
            "--only",
            "share_fe_ind_2030",
        ]);
        let Some(Commands::Metadata {
            format,
            fill_missing,
            na_values,
            only,
            ..
        }) = cli.command
        else {
            panic!("expected metadata command");
        };
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(fill_missing.len(), 2);
        assert_eq!(na_values, vec!["n/a".to_string()]);
        assert_eq!(only, vec!["share_fe_ind_2030".to_string()]);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["scenmeta", "metadata", "--format", "xlsx"]);
        assert!(result.is_err());
    }
}
