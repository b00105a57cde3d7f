//! Metadata command handler.
//!
//! Loads the scenario file, fills in requested aggregates, evaluates the
//! criteria registry and writes one row per criterion value.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use scenmeta_core::{
    DEFAULT_SCENARIO_FILE, DatasetSource, IamFrame, LoadOptions, MetadataRow, ResolvedPaths,
    add_missing_aggregates, default_criteria, evaluate_all, to_rows, write_csv, write_json,
};

use crate::commands::OutputFormat;
use crate::error::CliError;

/// Arguments for the metadata command.
#[derive(Debug, Default)]
pub struct MetadataArgs {
    pub work_dir: Option<String>,
    pub dataset_id: Option<String>,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub fill_missing: Vec<String>,
    pub na_values: Vec<String>,
    pub only: Vec<String>,
}

/// Execute the metadata command.
pub fn execute(args: &MetadataArgs) -> Result<(), CliError> {
    let rows = compute(args)?;
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            write_rows(&rows, args.format, BufWriter::new(file))?;
            tracing::info!(rows = rows.len(), output = %path.display(), "metadata written");
        }
        None => write_rows(&rows, args.format, io::stdout().lock())?,
    }
    Ok(())
}

/// Load, pre-process and evaluate; the testable part of the command.
pub fn compute(args: &MetadataArgs) -> Result<Vec<MetadataRow>, CliError> {
    let input = input_path(args)?;
    if !input.is_file() {
        return Err(CliError::Io(format!(
            "scenario file not found: {} (run `scenmeta download` first or pass --input)",
            input.display()
        )));
    }

    let mut options = LoadOptions::default();
    for token in &args.na_values {
        if !options.na_values.contains(token) {
            options.na_values.push(token.clone());
        }
    }
    let mut frame = IamFrame::from_path(&input, &options)?;

    for variable in &args.fill_missing {
        frame = add_missing_aggregates(frame, variable, None)?;
    }

    let mut criteria = default_criteria();
    if !args.only.is_empty() {
        if let Some(unknown) = args.only.iter().find(|key| criteria.get(key).is_none()) {
            return Err(CliError::Arguments(format!(
                "unknown criterion '{unknown}' (see `scenmeta criteria`)"
            )));
        }
        criteria.retain_keys(&args.only);
    }

    let results = evaluate_all(&frame, &criteria)?;
    Ok(to_rows(&results))
}

fn input_path(args: &MetadataArgs) -> Result<PathBuf, CliError> {
    if let Some(input) = &args.input {
        return Ok(input.clone());
    }
    let dataset = DatasetSource::resolve(args.dataset_id.as_deref(), None)?;
    let paths = ResolvedPaths::resolve(args.work_dir.as_deref(), &dataset)?;
    Ok(paths.layout.payload_file(DEFAULT_SCENARIO_FILE))
}

fn write_rows<W: Write>(rows: &[MetadataRow], format: OutputFormat, mut writer: W) -> Result<(), CliError> {
    match format {
        OutputFormat::Csv => write_csv(rows, &mut writer)?,
        OutputFormat::Json => write_json(rows, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}
