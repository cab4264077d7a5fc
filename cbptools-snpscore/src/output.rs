use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{SKIPPED_SNPS_HEADER, VARIANT_SCORES_HEADER};
use crate::errors::{Result, SnpScoreError};
use crate::generator::SkippedSnp;
use crate::predict::SnpPredictions;
use crate::scores::SnpEffectScores;

///
/// Write `variant_scores.tsv`. Coordinates and alleles come from the variant records
/// themselves, so chromosome names containing `_` are kept intact.
///
pub fn write_variant_scores(
    path: &Path,
    predictions: &SnpPredictions,
    scores: &[SnpEffectScores],
) -> Result<()> {
    if predictions.len() != scores.len() {
        return Err(SnpScoreError::LengthMismatch(predictions.len(), scores.len()));
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", VARIANT_SCORES_HEADER.join("\t"))?;

    for (snp, score) in predictions.snps.iter().zip(scores.iter()) {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            snp.chr,
            snp.pos0,
            snp.ref_allele,
            snp.alt_allele,
            score.log_counts_diff,
            score.log_probs_diff_abs_sum,
            score.probs_jsd_diff,
            snp.meta_data
        )?;
    }
    writer.flush()?;

    Ok(())
}

///
/// Write the variants that were not scored and why.
///
pub fn write_skipped_snps(path: &Path, skipped: &[SkippedSnp]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}", SKIPPED_SNPS_HEADER.join("\t"))?;

    for s in skipped {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}",
            s.snp.chr, s.snp.pos0, s.snp.ref_allele, s.snp.alt_allele, s.reason, s.snp.meta_data
        )?;
    }
    writer.flush()?;

    Ok(())
}

///
/// Raw predictions at every scored variant, for computing other effect metrics later.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionArchive {
    pub rsids: Vec<String>,
    pub ref_logcount_preds: Vec<f32>,
    pub alt_logcount_preds: Vec<f32>,
    pub ref_prob_preds: Vec<Vec<f32>>,
    pub alt_prob_preds: Vec<Vec<f32>>,
}

impl From<&SnpPredictions> for PredictionArchive {
    fn from(value: &SnpPredictions) -> Self {
        let rows = |probs: &ndarray::Array2<f32>| -> Vec<Vec<f32>> {
            probs.outer_iter().map(|row| row.to_vec()).collect()
        };

        PredictionArchive {
            rsids: value.rsids(),
            ref_logcount_preds: value.ref_logcounts.to_vec(),
            alt_logcount_preds: value.alt_logcounts.to_vec(),
            ref_prob_preds: rows(&value.ref_probs),
            alt_prob_preds: rows(&value.alt_probs),
        }
    }
}

impl PredictionArchive {
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cbptools_core::models::SnpRecord;
    use ndarray::array;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::generator::SkipReason;

    fn record(chr: &str, pos0: u64) -> SnpRecord {
        SnpRecord {
            chr: chr.to_string(),
            pos0,
            ref_allele: "A".to_string(),
            alt_allele: "T".to_string(),
            meta_data: "rs1".to_string(),
        }
    }

    #[fixture]
    fn predictions() -> SnpPredictions {
        SnpPredictions {
            snps: vec![record("chrUn_KI270742v1", 120), record("chr1", 7)],
            ref_logcounts: array![1.0, 2.0],
            alt_logcounts: array![1.5, 2.0],
            ref_probs: array![[0.25, 0.75], [0.5, 0.5]],
            alt_probs: array![[0.5, 0.5], [0.5, 0.5]],
        }
    }

    #[rstest]
    fn test_variant_scores_keep_underscored_chromosomes(predictions: SnpPredictions) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("variant_scores.tsv");
        let scores = vec![
            SnpEffectScores {
                log_counts_diff: 0.5,
                log_probs_diff_abs_sum: 1.0,
                probs_jsd_diff: 0.25,
            },
            SnpEffectScores {
                log_counts_diff: 0.0,
                log_probs_diff_abs_sum: 0.0,
                probs_jsd_diff: 0.0,
            },
        ];

        write_variant_scores(&path, &predictions, &scores).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "CHR\tPOS0\tREF\tALT\tlog_counts_diff\tlog_probs_diff_abs_sum\tprobs_jsd_diff\tMETA_DATA",
                "chrUn_KI270742v1\t120\tA\tT\t0.5\t1\t0.25\trs1",
                "chr1\t7\tA\tT\t0\t0\t0\trs1",
            ]
        );
    }

    #[rstest]
    fn test_scores_must_match_predictions(predictions: SnpPredictions) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("variant_scores.tsv");

        assert!(matches!(
            write_variant_scores(&path, &predictions, &[]),
            Err(SnpScoreError::LengthMismatch(2, 0))
        ));
    }

    #[rstest]
    fn test_skipped_snps(predictions: SnpPredictions) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("skipped_snps.tsv");
        let skipped = vec![SkippedSnp {
            snp: predictions.snps[1].clone(),
            reason: SkipReason::OutOfBounds,
        }];

        write_skipped_snps(&path, &skipped).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "CHR\tPOS0\tREF\tALT\treason\tMETA_DATA\nchr1\t7\tA\tT\tout_of_bounds\trs1\n"
        );
    }

    #[rstest]
    fn test_archive_save_and_load(predictions: SnpPredictions) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("predictions_at_snp.bin");

        let archive = PredictionArchive::from(&predictions);
        assert_eq!(archive.rsids[0], "chrUn_KI270742v1_120_A_T");
        assert_eq!(archive.ref_prob_preds[0], vec![0.25, 0.75]);

        archive.save(&path).unwrap();
        assert_eq!(PredictionArchive::load(&path).unwrap(), archive);
    }

    #[cfg(unix)]
    #[rstest]
    fn test_archive_save_reports_full_disk(predictions: SnpPredictions) {
        let archive = PredictionArchive::from(&predictions);
        assert!(archive.save(Path::new("/dev/full")).is_err());
    }
}
