//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, installs the tracing subscriber and
//! dispatches to the handlers. Errors are mapped to exit codes here.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use scenmeta_cli::handlers::download::DownloadArgs;
use scenmeta_cli::handlers::metadata::MetadataArgs;
use scenmeta_cli::{Cli, Commands, exit_code_for, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap and the filter read them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = exit_code_for(&err);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Download {
            dataset_id,
            url,
            keep_archive,
            quiet,
        } => {
            let args = DownloadArgs {
                work_dir: cli.work_dir.as_deref(),
                dataset_id: dataset_id.as_deref(),
                url: url.as_deref(),
                keep_archive,
                quiet,
            };
            handlers::download::execute(args).await?;
        }
        Commands::Metadata {
            input,
            output,
            format,
            fill_missing,
            na_values,
            only,
            dataset_id,
        } => {
            let args = MetadataArgs {
                work_dir: cli.work_dir,
                dataset_id,
                input,
                output,
                format,
                fill_missing,
                na_values,
                only,
            };
            handlers::metadata::execute(&args)?;
        }
        Commands::Criteria => handlers::criteria::execute(),
        Commands::Paths { dataset_id } => {
            handlers::paths::execute(cli.work_dir.as_deref(), dataset_id.as_deref())?;
        }
    }

    Ok(())
}
