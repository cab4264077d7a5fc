//! # Fold splits for ChromBPNet-style training regions
//!
//! Splits peak and non-peak regions into five cross-validation folds. Nearby regions
//! are grouped so that overlapping (jittered) input windows never straddle a split,
//! groups are ranked by total signal, and every group is held out (as `valid` or
//! `test`) in exactly one fold and used for `train` in the other four.
//!
//! ```rust,ignore
//! use cbptools_splits::{make_splits, SplitParams};
//!
//! let table = make_splits(&peaks, &nonpeaks, &chrom_sizes, &mut signal, &SplitParams::default())?;
//! table.write_tsv(&splits_path("out/sample"))?;
//! ```
pub mod consts;
pub mod errors;
pub mod folds;
pub mod group;
pub mod table;
pub mod weight;

use std::collections::HashMap;
use std::path::PathBuf;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use cbptools_core::errors::BoundsError;
use cbptools_core::models::{Locus, RegionSet};
use cbptools_core::traits::SignalTrack;

use crate::consts::{
    DEFAULT_INPUTLEN, DEFAULT_MAX_JITTER, DEFAULT_OUTPUTLEN, DEFAULT_SEED, SPLITS_SUFFIX,
};

pub use crate::errors::{Result, SplitsError};
pub use crate::folds::{FoldAssigner, FoldAssignment, FoldLabel, assign_folds};
pub use crate::group::{RegionGroup, group_regions, max_group_gap};
pub use crate::table::{FoldSummary, SplitsRow, SplitsTable};
pub use crate::weight::{group_weight, rank_by_weight, weigh_groups};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParams {
    pub inputlen: u64,
    /// Only reported; the split does not depend on it.
    pub outputlen: u64,
    pub max_jitter: u64,
    pub seed: u64,
}

impl Default for SplitParams {
    fn default() -> Self {
        SplitParams {
            inputlen: DEFAULT_INPUTLEN,
            outputlen: DEFAULT_OUTPUTLEN,
            max_jitter: DEFAULT_MAX_JITTER,
            seed: DEFAULT_SEED,
        }
    }
}

///
/// Path of the splits table for an output prefix: `<prefix>.splits.tsv`
///
pub fn splits_path(output_prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}{}", output_prefix, SPLITS_SUFFIX))
}

///
/// Pool peaks and non-peaks into sorted loci, checking each chromosome against the genome.
///
pub fn pooled_loci(
    peaks: &RegionSet,
    nonpeaks: &RegionSet,
    chrom_sizes: &HashMap<String, u64>,
) -> Result<Vec<Locus>> {
    let mut loci: Vec<Locus> = peaks.loci();
    loci.extend(nonpeaks.loci());

    if loci.is_empty() {
        return Err(SplitsError::EmptyInput);
    }

    if let Some(locus) = loci.iter().find(|l| !chrom_sizes.contains_key(&l.chr)) {
        return Err(BoundsError::UnknownChromosome(locus.chr.clone()).into());
    }

    loci.sort();
    Ok(loci)
}

///
/// Compute the fold splits of peaks and non-peaks.
///
/// # Arguments
/// - peaks: peak regions
/// - nonpeaks: background regions
/// - chrom_sizes: chromosome lengths of the reference genome
/// - signal: signal track the groups are weighed by
/// - params: window sizes and seed
pub fn make_splits<S: SignalTrack + ?Sized>(
    peaks: &RegionSet,
    nonpeaks: &RegionSet,
    chrom_sizes: &HashMap<String, u64>,
    signal: &mut S,
    params: &SplitParams,
) -> Result<SplitsTable> {
    info!(
        "Splitting {} peaks and {} non-peaks (inputlen={}, outputlen={}, max_jitter={}, seed={})",
        peaks.len(),
        nonpeaks.len(),
        params.inputlen,
        params.outputlen,
        params.max_jitter,
        params.seed
    );

    let loci = pooled_loci(peaks, nonpeaks, chrom_sizes)?;

    let groups = group_regions(&loci, max_group_gap(params.inputlen, params.max_jitter));
    info!("Grouped {} regions into {} groups", loci.len(), groups.len());

    let weights = weigh_groups(&groups, signal, params.inputlen)?;
    let ranked: Vec<RegionGroup> = rank_by_weight(&weights)
        .into_iter()
        .map(|i| groups[i].clone())
        .collect();

    let mut rng = StdRng::seed_from_u64(params.seed);
    let assignments = assign_folds(ranked.len(), &mut rng);
    debug!("Assigned folds to {} groups", assignments.len());

    Ok(SplitsTable::build(&ranked, &assignments))
}

#[cfg(test)]
mod tests {
    use super::*;

    use cbptools_core::models::Region;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn region(chr: &str, start: u32, summit: u32) -> Region {
        Region {
            chr: chr.to_string(),
            start,
            end: start + 2 * summit,
            summit,
        }
    }

    #[rstest]
    fn test_default_params() {
        let params = SplitParams::default();
        assert_eq!(params.inputlen, 2114);
        assert_eq!(params.outputlen, 1000);
        assert_eq!(params.max_jitter, 500);
        assert_eq!(params.seed, 1234);
    }

    #[rstest]
    fn test_splits_path() {
        assert_eq!(
            splits_path("out/sample"),
            PathBuf::from("out/sample.splits.tsv")
        );
    }

    #[rstest]
    fn test_pooled_loci_sorted() {
        let peaks = RegionSet::from(vec![region("chr2", 100, 50), region("chr1", 900, 50)]);
        let nonpeaks = RegionSet::from(vec![region("chr1", 100, 50)]);
        let chrom_sizes = HashMap::from([("chr1".to_string(), 2000), ("chr2".to_string(), 2000)]);

        let loci = pooled_loci(&peaks, &nonpeaks, &chrom_sizes).unwrap();
        assert_eq!(
            loci,
            vec![
                Locus::new("chr1", 150),
                Locus::new("chr1", 950),
                Locus::new("chr2", 150)
            ]
        );
    }

    #[rstest]
    fn test_pooled_loci_unknown_chromosome() {
        let peaks = RegionSet::from(vec![region("chrX", 100, 50)]);
        let nonpeaks = RegionSet::from(vec![]);
        let chrom_sizes = HashMap::from([("chr1".to_string(), 2000)]);

        let result = pooled_loci(&peaks, &nonpeaks, &chrom_sizes);
        assert!(matches!(
            result,
            Err(SplitsError::Bounds(BoundsError::UnknownChromosome(c))) if c == "chrX"
        ));
    }

    #[rstest]
    fn test_pooled_loci_empty() {
        let empty = RegionSet::from(vec![]);
        let result = pooled_loci(&empty, &empty, &HashMap::new());
        assert!(matches!(result, Err(SplitsError::EmptyInput)));
    }
}
