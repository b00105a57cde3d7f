//! Paths command handler.
//!
//! Displays the resolved working directory and dataset layout in
//! `key = value` format.

use scenmeta_core::{DatasetSource, ResolvedPaths};

use crate::error::CliError;

/// Execute the paths command.
pub fn execute(work_dir: Option<&str>, dataset_id: Option<&str>) -> Result<(), CliError> {
    let dataset = DatasetSource::resolve(dataset_id, None)?;
    let paths = ResolvedPaths::resolve(work_dir, &dataset)?;
    println!("{paths}");
    Ok(())
}
