use std::io;
use thiserror::Error;

use cbptools_core::errors::BoundsError;

/// Error type for cbptools-io operations.
#[derive(Error, Debug)]
pub enum GenomeIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The FASTA file could not be parsed.
    #[error("Error reading genome file {path}: {reason}")]
    FastaParse { path: String, reason: String },

    /// The FASTA file holds the same sequence name twice.
    #[error("Duplicate sequence {0} in genome file")]
    DuplicateSequence(String),

    /// The bigWig file could not be opened.
    #[error("Error opening bigWig file {path}: {reason}")]
    BigWigOpen { path: String, reason: String },

    /// Path is not valid UTF-8.
    #[error("Path is not valid UTF-8: {0}")]
    InvalidPath(String),

    /// Query fell outside of the genome.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Result type alias for cbptools-io operations.
pub type Result<T> = std::result::Result<T, GenomeIoError>;
