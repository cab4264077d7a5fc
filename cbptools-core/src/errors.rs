use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("{path}:{line}: expected {expected} tab-separated columns, found {found}")]
    ColumnCount {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: error parsing {field}: {value:?}")]
    FieldParseError {
        path: String,
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Corrupted file. 0 records found in the file: {0}")]
    EmptyRegionSet(String),

    #[error("{path}:{line}: duplicate variant id {id}")]
    DuplicateVariant {
        path: String,
        line: usize,
        id: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coordinates that fall outside of what a genome or signal track can answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Unknown chromosome: {0}")]
    UnknownChromosome(String),

    #[error("Interval {chrom}:{start}-{end} is out of bounds (chromosome length {chrom_len})")]
    OutOfBounds {
        chrom: String,
        start: i64,
        end: i64,
        chrom_len: u64,
    },
}

#[derive(Error, Debug)]
pub enum SignalError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error("Error reading signal track: {0}")]
    ReadError(String),
}
