//! Umbrella error for core operations.
//!
//! Adapters match on the variant to pick exit codes and messages.

use thiserror::Error;

use crate::aggregates::AggregateError;
use crate::criteria::CriterionError;
use crate::dataset::DatasetError;
use crate::frame::FrameError;
use crate::metadata::MetadataError;
use crate::paths::PathError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Criterion(#[from] CriterionError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}
