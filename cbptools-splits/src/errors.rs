use thiserror::Error;

use cbptools_core::errors::{BoundsError, RegionSetError, SignalError};

#[derive(Error, Debug)]
pub enum SplitsError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Input(#[from] RegionSetError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error("No regions to split")]
    EmptyInput,

    #[error("{path}:{line}: invalid splits table row: {reason}")]
    TableParseError {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid fold label: {0:?}. Must be one of train, valid or test")]
    InvalidFoldLabel(String),

    #[error("Progress bar template error: {0}")]
    ProgressTemplate(String),
}

pub type Result<T> = std::result::Result<T, SplitsError>;
