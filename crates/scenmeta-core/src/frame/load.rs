//! Wide-format IAMC CSV loading.
//!
//! Published model output files often carry trailing empty columns, blank
//! rows made of commas, and model-specific "missing" markers such as `UNDF`.
//! All of these are tolerated here.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

use super::{IamFrame, SeriesKey, TimeSeries};

/// Token one of the source models writes instead of leaving a cell empty.
pub const DEFAULT_NA_VALUE: &str = "UNDF";

const DIMENSIONS: [&str; 5] = ["model", "scenario", "region", "variable", "unit"];

/// Errors raised while reading an IAMC table.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Failed to open {path}: {message}")]
    Io { path: String, message: String },

    #[error("CSV error: {message}")]
    Csv { line: Option<u64>, message: String },

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("No year columns found in header")]
    NoYearColumns,

    #[error("Line {line}: empty value in required column '{column}'")]
    EmptyDimension { line: u64, column: &'static str },

    #[error("Line {line}: value '{value}' in column {year} is not a number")]
    InvalidValue { line: u64, year: i32, value: String },

    #[error("Duplicate series {model} / {scenario} / {region} / {variable}")]
    DuplicateSeries {
        model: String,
        scenario: String,
        region: String,
        variable: String,
    },
}

impl From<csv::Error> for FrameError {
    fn from(err: csv::Error) -> Self {
        Self::Csv {
            line: err.position().map(csv::Position::line),
            message: err.to_string(),
        }
    }
}

/// Options controlling how cells are interpreted.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Cell contents treated as missing, in addition to empty cells.
    pub na_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            na_values: vec![DEFAULT_NA_VALUE.to_string()],
        }
    }
}

impl LoadOptions {
    fn is_missing(&self, cell: &str) -> bool {
        cell.is_empty() || self.na_values.iter().any(|na| na == cell)
    }
}

/// Column positions resolved from the header row.
struct Columns {
    dimensions: [usize; 5],
    years: Vec<(usize, i32)>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self, FrameError> {
        let mut dimensions = [usize::MAX; 5];
        let mut years = Vec::new();

        for (idx, name) in header.iter().enumerate() {
            let lower = name.to_ascii_lowercase();
            if let Some(pos) = DIMENSIONS.iter().position(|d| *d == lower) {
                dimensions[pos] = idx;
            } else if let Ok(year) = name.parse::<i32>() {
                years.push((idx, year));
            } else if !name.is_empty() {
                tracing::debug!(column = name, "ignoring non-IAMC column");
            }
        }

        for (pos, idx) in dimensions.iter().enumerate() {
            if *idx == usize::MAX {
                return Err(FrameError::MissingColumn(DIMENSIONS[pos]));
            }
        }
        if years.is_empty() {
            return Err(FrameError::NoYearColumns);
        }

        Ok(Self { dimensions, years })
    }
}

impl IamFrame {
    /// Load a wide IAMC CSV file.
    pub fn from_path(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, FrameError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| FrameError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let frame = Self::from_reader(file, options)?;
        tracing::info!(
            path = %path.display(),
            series = frame.len(),
            "loaded IAMC scenario data"
        );
        Ok(frame)
    }

    /// Load a wide IAMC CSV table from any reader.
    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self, FrameError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = Columns::from_header(reader.headers()?)?;
        let mut frame = Self::new();
        let mut skipped_empty = 0usize;

        for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record.position().map_or(0, csv::Position::line);

            let mut dims: [String; 5] = Default::default();
            for (slot, (pos, idx)) in dims.iter_mut().zip(columns.dimensions.iter().enumerate()) {
                let cell = record.get(*idx).unwrap_or_default();
                if options.is_missing(cell) {
                    return Err(FrameError::EmptyDimension {
                        line,
                        column: DIMENSIONS[pos],
                    });
                }
                *slot = cell.to_string();
            }

            let mut values = BTreeMap::new();
            for &(idx, year) in &columns.years {
                let cell = record.get(idx).unwrap_or_default();
                if options.is_missing(cell) {
                    continue;
                }
                let value = cell.parse::<f64>().map_err(|_| FrameError::InvalidValue {
                    line,
                    year,
                    value: cell.to_string(),
                })?;
                if value.is_finite() {
                    values.insert(year, value);
                }
            }

            if values.is_empty() {
                skipped_empty += 1;
                continue;
            }

            let [model, scenario, region, variable, unit] = dims;
            frame.push(TimeSeries {
                key: SeriesKey {
                    model,
                    scenario,
                    region,
                    variable,
                    unit,
                },
                values,
            })?;
        }

        if skipped_empty > 0 {
            tracing::debug!(count = skipped_empty, "dropped series without values");
        }
        Ok(frame)
    }
}
