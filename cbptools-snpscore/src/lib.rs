//! # Variant effect scoring
//!
//! Scores single nucleotide variants with a base-resolution profile model: each
//! variant's reference and alternate allele are placed in the middle of a genomic
//! window, the model predicts a profile and a total count for both, and the two
//! predictions are compared.
//!
//! Three scores are reported per variant:
//! - `log_counts_diff`: alternate minus reference log count
//! - `log_probs_diff_abs_sum`: summed absolute difference of per-base log probabilities
//! - `probs_jsd_diff`: Jensen-Shannon distance between the two profiles
pub mod consts;
pub mod encode;
pub mod errors;
pub mod generator;
pub mod model;
pub mod output;
pub mod predict;
pub mod scores;

use std::path::{Path, PathBuf};

use log::{info, warn};

use cbptools_core::models::SnpSet;
use cbptools_core::traits::SequenceSource;

use crate::consts::{PREDICTIONS_FILE, SKIPPED_SNPS_FILE, VARIANT_SCORES_FILE};

pub use crate::errors::{Result, SnpScoreError};
pub use crate::generator::{
    SequenceWindowGenerator, SkipReason, SkippedSnp, SnpWindow, SnpWindowGenerator, snp_window,
};
pub use crate::model::{LinearConvModel, ModelOutput, ProfileModel};
pub use crate::output::{PredictionArchive, write_skipped_snps, write_variant_scores};
pub use crate::predict::{SnpPredictions, fetch_snp_predictions, softmax};
pub use crate::scores::{
    SnpEffectScores, jensen_shannon_distance, log_probs_diff_abs_sum, predict_snp_effect_scores,
};

/// What a scoring run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub n_scored: usize,
    pub n_skipped: usize,
    pub variant_scores: PathBuf,
    pub predictions: PathBuf,
    /// Only written when variants were skipped.
    pub skipped_snps: Option<PathBuf>,
}

///
/// Score every variant in `snps` and write the results to `output_dir`.
///
/// The input window length is taken from the model.
///
/// # Arguments
/// - snps: variants to score
/// - genome: reference sequence
/// - model: profile model
/// - batch_size: number of variants per model call
/// - output_dir: existing directory for `variant_scores.tsv`, `predictions_at_snp.bin`
///   and, if any variant was skipped, `skipped_snps.tsv`
pub fn score_snps<S, M>(
    snps: &SnpSet,
    genome: &S,
    model: &M,
    batch_size: usize,
    output_dir: &Path,
) -> Result<ScoreSummary>
where
    S: SequenceSource + ?Sized,
    M: ProfileModel + ?Sized,
{
    if !output_dir.is_dir() {
        return Err(SnpScoreError::OutputDirMissing(
            output_dir.display().to_string(),
        ));
    }

    let input_len = model.input_len();
    info!("Input length inferred from the model: {}", input_len);

    let generator = SnpWindowGenerator::new(snps, genome, input_len, batch_size)?;
    let predictions = fetch_snp_predictions(&generator, model)?;
    let scores = predict_snp_effect_scores(&predictions)?;

    let variant_scores = output_dir.join(VARIANT_SCORES_FILE);
    write_variant_scores(&variant_scores, &predictions, &scores)?;

    let archive = output_dir.join(PREDICTIONS_FILE);
    PredictionArchive::from(&predictions).save(&archive)?;

    let skipped_snps = if generator.skipped().is_empty() {
        None
    } else {
        let path = output_dir.join(SKIPPED_SNPS_FILE);
        write_skipped_snps(&path, generator.skipped())?;
        warn!(
            "{} SNPs were skipped, see {}",
            generator.skipped().len(),
            path.display()
        );
        Some(path)
    };

    info!(
        "Scored {} of {} SNPs, results in {}",
        predictions.len(),
        snps.len(),
        variant_scores.display()
    );

    Ok(ScoreSummary {
        n_scored: predictions.len(),
        n_skipped: generator.skipped().len(),
        variant_scores,
        predictions: archive,
        skipped_snps,
    })
}
