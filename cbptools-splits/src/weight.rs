use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use cbptools_core::models::Locus;
use cbptools_core::traits::SignalTrack;

use crate::errors::{Result, SplitsError};
use crate::group::RegionGroup;

///
/// The `[start, end)` window of width `inputlen` centred on a locus. Signed, so
/// windows that hang off the start of a chromosome stay visible to bounds checks.
///
pub fn locus_window(locus: &Locus, inputlen: u64) -> (i64, i64) {
    let half = (inputlen / 2) as i64;
    let pos = locus.pos as i64;
    (pos - half, pos + half)
}

///
/// Total signal of a group: the signal summed over the `inputlen` window of every
/// member locus. Missing values count as zero.
///
pub fn group_weight<S: SignalTrack + ?Sized>(
    group: &RegionGroup,
    signal: &mut S,
    inputlen: u64,
) -> Result<f64> {
    let mut total = 0.0;
    for locus in &group.loci {
        let (start, end) = locus_window(locus, inputlen);
        total += signal.sum(&locus.chr, start, end)?;
    }
    Ok(total)
}

///
/// Weigh every group, in order.
///
pub fn weigh_groups<S: SignalTrack + ?Sized>(
    groups: &[RegionGroup],
    signal: &mut S,
    inputlen: u64,
) -> Result<Vec<f64>> {
    let pb = ProgressBar::new(groups.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} groups ({eta})")
            .map_err(|e| SplitsError::ProgressTemplate(e.to_string()))?
            .progress_chars("##-"),
    );

    let mut weights = Vec::with_capacity(groups.len());
    for group in groups {
        weights.push(group_weight(group, signal, inputlen)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    debug!("Weighed {} groups", weights.len());

    Ok(weights)
}

///
/// Indices of `weights` sorted ascending. The sort is stable, so groups with equal
/// weight keep their genomic order.
///
pub fn rank_by_weight(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[a].total_cmp(&weights[b]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use cbptools_core::errors::{BoundsError, SignalError};
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn signal() -> HashMap<String, Vec<f32>> {
        let mut track = HashMap::new();
        // one count per base, NaN every 10th base
        let chr1: Vec<f32> = (0..1000)
            .map(|i| if i % 10 == 0 { f32::NAN } else { 1.0 })
            .collect();
        track.insert("chr1".to_string(), chr1);
        track
    }

    #[rstest]
    fn test_locus_window_is_centred() {
        assert_eq!(locus_window(&Locus::new("chr1", 500), 200), (400, 600));
        assert_eq!(locus_window(&Locus::new("chr1", 500), 201), (400, 600));
        assert_eq!(locus_window(&Locus::new("chr1", 50), 200), (-50, 150));
    }

    #[rstest]
    fn test_group_weight_sums_members(mut signal: HashMap<String, Vec<f32>>) {
        let group = RegionGroup {
            loci: vec![Locus::new("chr1", 200), Locus::new("chr1", 300)],
        };

        // each 100 bp window holds 10 NaNs
        let weight = group_weight(&group, &mut signal, 100).unwrap();
        assert_eq!(weight, 180.0);
    }

    #[rstest]
    fn test_group_weight_out_of_bounds(mut signal: HashMap<String, Vec<f32>>) {
        let group = RegionGroup {
            loci: vec![Locus::new("chr1", 20)],
        };

        let result = group_weight(&group, &mut signal, 100);
        assert!(matches!(
            result,
            Err(SplitsError::Signal(SignalError::Bounds(
                BoundsError::OutOfBounds { start: -30, .. }
            )))
        ));
    }

    #[rstest]
    fn test_weigh_groups(mut signal: HashMap<String, Vec<f32>>) {
        let groups = vec![
            RegionGroup {
                loci: vec![Locus::new("chr1", 200)],
            },
            RegionGroup {
                loci: vec![Locus::new("chr1", 500), Locus::new("chr1", 700)],
            },
        ];

        let weights = weigh_groups(&groups, &mut signal, 100).unwrap();
        assert_eq!(weights, vec![90.0, 180.0]);
    }

    #[rstest]
    fn test_rank_by_weight_is_stable() {
        let weights = vec![3.0, 1.0, 2.0, 1.0, 0.5];
        assert_eq!(rank_by_weight(&weights), vec![4, 1, 3, 2, 0]);
    }
}
