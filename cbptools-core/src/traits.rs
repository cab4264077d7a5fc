//! Narrow capability interfaces over the genomic data sources the tools consume.
//!
//! The fold splitter only needs to sum signal over windows and the variant scorer only
//! needs to slice reference sequence, so both are written against these traits rather
//! than concrete bigWig/FASTA readers.
use std::collections::HashMap;

use crate::errors::{BoundsError, SignalError};
use crate::utils::check_bounds;

/// A genome-wide numeric track that can be range-queried (e.g. a bigWig of Tn5 insertions).
pub trait SignalTrack {
    ///
    /// Length of a chromosome, `None` when the track does not know it.
    ///
    fn chrom_len(&self, chrom: &str) -> Option<u64>;

    ///
    /// Per-base values over `[start, end)`. Positions without data are `NaN`.
    /// Callers must pass in-bounds coordinates.
    ///
    fn values(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<f32>, SignalError>;

    ///
    /// Sum of the signal over `[start, end)`, missing values counted as zero.
    ///
    /// Coordinates are signed so that windows hanging off the start of a chromosome
    /// are reported as [BoundsError::OutOfBounds] instead of wrapping.
    ///
    fn sum(&mut self, chrom: &str, start: i64, end: i64) -> Result<f64, SignalError> {
        let chrom_len = self
            .chrom_len(chrom)
            .ok_or_else(|| BoundsError::UnknownChromosome(chrom.to_string()))?;
        let (start, end) = check_bounds(chrom, start, end, chrom_len)?;

        let values = self.values(chrom, start, end)?;
        Ok(values
            .iter()
            .filter(|v| !v.is_nan())
            .map(|v| *v as f64)
            .sum())
    }
}

/// Reference sequence that can be sliced by coordinates.
pub trait SequenceSource {
    fn chrom_len(&self, chrom: &str) -> Option<u64>;

    ///
    /// Bases over `[start, end)`. Fails with a [BoundsError] when the interval
    /// is not fully contained in the chromosome.
    ///
    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<&[u8], BoundsError>;
}

impl SignalTrack for HashMap<String, Vec<f32>> {
    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.get(chrom).map(|v| v.len() as u64)
    }

    fn values(&mut self, chrom: &str, start: u64, end: u64) -> Result<Vec<f32>, SignalError> {
        let track = self
            .get(chrom)
            .ok_or_else(|| BoundsError::UnknownChromosome(chrom.to_string()))?;
        Ok(track[start as usize..end as usize].to_vec())
    }
}

impl SequenceSource for HashMap<String, Vec<u8>> {
    fn chrom_len(&self, chrom: &str) -> Option<u64> {
        self.get(chrom).map(|s| s.len() as u64)
    }

    fn fetch(&self, chrom: &str, start: i64, end: i64) -> Result<&[u8], BoundsError> {
        let seq = self
            .get(chrom)
            .ok_or_else(|| BoundsError::UnknownChromosome(chrom.to_string()))?;
        let (start, end) = check_bounds(chrom, start, end, seq.len() as u64)?;
        Ok(&seq[start as usize..end as usize])
    }
}
