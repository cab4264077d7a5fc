use thiserror::Error;

use cbptools_core::errors::{BoundsError, RegionSetError};

#[derive(Error, Debug)]
pub enum SnpScoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Input(#[from] RegionSetError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error("Failed to load model {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Shape mismatch in {what}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Vectors differ in length: {0} vs {1}")]
    LengthMismatch(usize, usize),

    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(String),

    #[error("Batch size must be at least 1")]
    InvalidBatchSize,

    #[error("Prediction archive error: {0}")]
    Archive(#[from] bincode::Error),

    #[error("Progress bar template error: {0}")]
    ProgressTemplate(String),
}

pub type Result<T> = std::result::Result<T, SnpScoreError>;
