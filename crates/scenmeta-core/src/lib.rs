//! Core domain of scenmeta.
//!
//! - `dataset` - identity of the published archive
//! - `paths` - working directory and on-disk layout
//! - `frame` - IAMC scenario data loading
//! - `aggregates` - filling in missing aggregate variables
//! - `criteria` - metadata criteria definitions and evaluation
//! - `metadata` - flattened output table

#![deny(unused_crate_dependencies)]

pub mod aggregates;
pub mod criteria;
pub mod dataset;
pub mod error;
pub mod frame;
pub mod metadata;
pub mod paths;
pub mod units;

pub use aggregates::{AggregateError, add_missing_aggregates, direct_components};
pub use criteria::definitions::default_criteria;
pub use criteria::{
    AggregateCriterion, ChangeOverTimeCriterion, CriteriaSet, Criterion, CriterionError,
    CriterionKind, CriterionValue, CriterionValues, RegionFilter, ShareCriterion,
};
pub use dataset::{
    DEFAULT_DATASET_ID, DEFAULT_DATASET_URL, DEFAULT_SCENARIO_FILE, DatasetError, DatasetSource,
};
pub use error::CoreError;
pub use frame::{FrameError, IamFrame, LoadOptions, SeriesKey, TimeSeries};
pub use metadata::{MetadataError, MetadataRow, evaluate_all, to_rows, write_csv, write_json};
pub use paths::{
    DatasetLayout, DirectoryCreationStrategy, PathError, ResolvedPaths, WorkDirSource,
    ensure_directory, resolve_work_dir,
};
