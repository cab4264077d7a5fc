use cbptools_core::models::Locus;

///
/// Loci on one chromosome whose input windows may overlap once jittered.
/// Groups are never split across folds.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    pub loci: Vec<Locus>,
}

impl RegionGroup {
    pub fn chr(&self) -> &str {
        &self.loci[0].chr
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }
}

///
/// Largest distance between consecutive summits that still lands them in the same
/// group: `inputlen + 2 * max_jitter`.
///
pub fn max_group_gap(inputlen: u64, max_jitter: u64) -> u64 {
    inputlen + 2 * max_jitter
}

///
/// Group loci by chromosomal proximity in a single pass.
///
/// `loci` must be sorted by (chromosome, position). A new group starts whenever the
/// chromosome changes or the gap to the previous locus exceeds `max_gap`.
///
/// # Arguments
/// - loci: sorted loci
/// - max_gap: see [max_group_gap]
pub fn group_regions(loci: &[Locus], max_gap: u64) -> Vec<RegionGroup> {
    let mut groups: Vec<RegionGroup> = Vec::new();
    let mut current: Vec<Locus> = Vec::new();

    for locus in loci {
        if let Some(last) = current.last() {
            let joins = last.chr == locus.chr && locus.pos <= last.pos + max_gap;
            if !joins {
                groups.push(RegionGroup {
                    loci: std::mem::take(&mut current),
                });
            }
        }
        current.push(locus.clone());
    }

    if !current.is_empty() {
        groups.push(RegionGroup { loci: current });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_gap_threshold_splits_groups() {
        let loci = vec![
            Locus::new("chr1", 100),
            Locus::new("chr1", 200),
            Locus::new("chr1", 5000),
        ];

        let groups = group_regions(&loci, max_group_gap(200, 0));

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].loci,
            vec![Locus::new("chr1", 100), Locus::new("chr1", 200)]
        );
        assert_eq!(groups[1].loci, vec![Locus::new("chr1", 5000)]);
    }

    #[rstest]
    fn test_gap_equal_to_threshold_joins() {
        let loci = vec![Locus::new("chr1", 100), Locus::new("chr1", 300)];
        let groups = group_regions(&loci, 200);
        assert_eq!(groups.len(), 1);

        let groups = group_regions(&loci, 199);
        assert_eq!(groups.len(), 2);
    }

    #[rstest]
    fn test_chromosome_change_splits_groups() {
        let loci = vec![Locus::new("chr1", 100), Locus::new("chr2", 100)];
        let groups = group_regions(&loci, 1_000_000);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].chr(), "chr1");
        assert_eq!(groups[1].chr(), "chr2");
    }

    #[rstest]
    fn test_chained_loci_form_one_group() {
        // every consecutive gap is within the threshold, even though the ends are far apart
        let loci: Vec<Locus> = (0..10).map(|i| Locus::new("chr1", i * 150)).collect();
        let groups = group_regions(&loci, 200);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 10);
    }

    #[rstest]
    fn test_duplicate_positions_share_a_group() {
        let loci = vec![Locus::new("chr1", 100), Locus::new("chr1", 100)];
        let groups = group_regions(&loci, 0);
        assert_eq!(groups.len(), 1);
    }

    #[rstest]
    fn test_empty_input() {
        assert!(group_regions(&[], 200).is_empty());
    }

    #[rstest]
    fn test_jitter_widens_threshold() {
        assert_eq!(max_group_gap(2114, 500), 3114);
        assert_eq!(max_group_gap(200, 0), 200);
    }
}
