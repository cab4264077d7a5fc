use std::fmt::{self, Display};

use log::{debug, warn};

use cbptools_core::errors::BoundsError;
use cbptools_core::models::{SnpRecord, SnpSet};
use cbptools_core::traits::SequenceSource;

use crate::errors::{Result, SnpScoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OutOfBounds,
    UnknownChromosome,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::OutOfBounds => "out_of_bounds",
            SkipReason::UnknownChromosome => "unknown_chromosome",
        };
        write!(f, "{}", reason)
    }
}

impl From<&BoundsError> for SkipReason {
    fn from(value: &BoundsError) -> Self {
        match value {
            BoundsError::OutOfBounds { .. } => SkipReason::OutOfBounds,
            BoundsError::UnknownChromosome(_) => SkipReason::UnknownChromosome,
        }
    }
}

/// A variant that could not be placed in a full input window.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSnp {
    pub snp: SnpRecord,
    pub reason: SkipReason,
}

///
/// The model inputs for one variant: the reference and alternate sequence windows.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SnpWindow {
    pub snp: SnpRecord,
    pub ref_seq: Vec<u8>,
    pub alt_seq: Vec<u8>,
}

///
/// Source of batches of sequence windows to run a model over.
///
pub trait SequenceWindowGenerator {
    fn input_len(&self) -> usize;

    /// Number of batches.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn batch(&self, index: usize) -> Result<Vec<SnpWindow>>;

    fn batches(&self) -> Box<dyn Iterator<Item = Result<Vec<SnpWindow>>> + '_> {
        Box::new((0..self.len()).map(move |i| self.batch(i)))
    }
}

///
/// Builds windows of `input_len` bases with a variant's allele inserted at offset
/// `input_len / 2`.
///
/// Variants whose window does not fit on the chromosome, or whose chromosome is not in
/// the genome, are set aside up front and reported through [SnpWindowGenerator::skipped].
///
pub struct SnpWindowGenerator<'a, S: SequenceSource + ?Sized> {
    genome: &'a S,
    input_len: usize,
    batch_size: usize,
    snps: Vec<SnpRecord>,
    skipped: Vec<SkippedSnp>,
    ref_mismatches: usize,
}

impl<'a, S: SequenceSource + ?Sized> SnpWindowGenerator<'a, S> {
    pub fn new(
        snps: &SnpSet,
        genome: &'a S,
        input_len: usize,
        batch_size: usize,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(SnpScoreError::InvalidBatchSize);
        }

        let mut kept = Vec::with_capacity(snps.len());
        let mut skipped = Vec::new();
        let mut ref_mismatches = 0;

        for snp in snps {
            match check_snp(snp, genome, input_len) {
                Ok(ref_matches) => {
                    if !ref_matches {
                        ref_mismatches += 1;
                    }
                    kept.push(snp.clone());
                }
                Err(e) => {
                    debug!("Skipping {}: {}", snp.id(), e);
                    skipped.push(SkippedSnp {
                        snp: snp.clone(),
                        reason: SkipReason::from(&e),
                    });
                }
            }
        }

        if !skipped.is_empty() {
            warn!(
                "{} of {} SNPs cannot be placed in a {} bp window and will not be scored",
                skipped.len(),
                snps.len(),
                input_len
            );
        }
        if ref_mismatches > 0 {
            warn!(
                "{} SNPs have a reference allele that does not match the genome, they are scored as given",
                ref_mismatches
            );
        }

        Ok(SnpWindowGenerator {
            genome,
            input_len,
            batch_size,
            snps: kept,
            skipped,
            ref_mismatches,
        })
    }

    /// Variants that will be scored, in input order.
    pub fn snps(&self) -> &[SnpRecord] {
        &self.snps
    }

    pub fn skipped(&self) -> &[SkippedSnp] {
        &self.skipped
    }

    /// Number of scored variants whose reference allele differs from the genome.
    pub fn ref_mismatches(&self) -> usize {
        self.ref_mismatches
    }
}

impl<S: SequenceSource + ?Sized> SequenceWindowGenerator for SnpWindowGenerator<'_, S> {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn len(&self) -> usize {
        self.snps.len().div_ceil(self.batch_size)
    }

    fn batch(&self, index: usize) -> Result<Vec<SnpWindow>> {
        let start = index * self.batch_size;
        let end = (start + self.batch_size).min(self.snps.len());

        self.snps
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|snp| snp_window(snp, self.genome, self.input_len))
            .collect()
    }
}

///
/// Flanks of the window around a variant: `[pos0 - input_len/2, pos0)` on the left,
/// and on the right enough bases after the reference allele to fill the window with
/// the shorter of the two alleles.
///
fn flank_bounds(snp: &SnpRecord, input_len: usize) -> ((i64, i64), (i64, i64)) {
    let half = input_len / 2;
    let pos = snp.pos0 as i64;
    let ref_end = pos + snp.ref_allele.len() as i64;
    let shortest = snp.ref_allele.len().min(snp.alt_allele.len());
    let right_len = (input_len - half).saturating_sub(shortest) as i64;

    ((pos - half as i64, pos), (ref_end, ref_end + right_len))
}

/// Whether the variant's window fits, and if so whether its reference allele matches the genome.
fn check_snp<S: SequenceSource + ?Sized>(
    snp: &SnpRecord,
    genome: &S,
    input_len: usize,
) -> std::result::Result<bool, BoundsError> {
    let ((left_start, left_end), (right_start, right_end)) = flank_bounds(snp, input_len);
    genome.fetch(&snp.chr, left_start, left_end)?;
    genome.fetch(&snp.chr, right_start, right_end)?;

    let genome_ref = genome.fetch(&snp.chr, left_end, right_start)?;
    let matches = genome_ref.eq_ignore_ascii_case(snp.ref_allele.as_bytes());
    if !matches {
        debug!(
            "Reference allele of {} does not match the genome ({})",
            snp.id(),
            String::from_utf8_lossy(genome_ref)
        );
    }
    Ok(matches)
}

fn insert_allele(left: &[u8], allele: &str, right: &[u8], input_len: usize) -> Vec<u8> {
    let mut seq = Vec::with_capacity(left.len() + allele.len() + right.len());
    seq.extend_from_slice(left);
    seq.extend_from_slice(allele.as_bytes());
    seq.extend_from_slice(right);
    seq.truncate(input_len);
    seq
}

///
/// Reference and alternate windows for a variant:
/// `genome[start..pos0] + allele + genome[pos0 + len(ref)..]`, truncated to `input_len`.
///
pub fn snp_window<S: SequenceSource + ?Sized>(
    snp: &SnpRecord,
    genome: &S,
    input_len: usize,
) -> Result<SnpWindow> {
    let ((left_start, left_end), (right_start, right_end)) = flank_bounds(snp, input_len);
    let left = genome.fetch(&snp.chr, left_start, left_end)?;
    let right = genome.fetch(&snp.chr, right_start, right_end)?;

    Ok(SnpWindow {
        snp: snp.clone(),
        ref_seq: insert_allele(left, &snp.ref_allele, right, input_len),
        alt_seq: insert_allele(left, &snp.alt_allele, right, input_len),
    })
}
