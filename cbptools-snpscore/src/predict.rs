use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use ndarray::{Array1, Array2, Axis};

use cbptools_core::models::SnpRecord;

use crate::encode::one_hot_encode;
use crate::errors::{Result, SnpScoreError};
use crate::generator::SequenceWindowGenerator;
use crate::model::{ModelOutput, ProfileModel};

///
/// Row-wise softmax at temperature 1. Each row is mean-centred before exponentiation.
///
pub fn softmax(logits: &Array2<f32>) -> Array2<f32> {
    let mut probs = logits.clone();
    for mut row in probs.axis_iter_mut(Axis(0)) {
        let mean = row.mean().unwrap_or(0.0);
        row.mapv_inplace(|v| (v - mean).exp());
        let total = row.sum();
        row.mapv_inplace(|v| v / total);
    }
    probs
}

///
/// Model predictions at the reference and alternate allele of every scored variant.
/// Row `i` of every array belongs to `snps[i]`.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SnpPredictions {
    pub snps: Vec<SnpRecord>,
    pub ref_logcounts: Array1<f32>,
    pub alt_logcounts: Array1<f32>,
    pub ref_probs: Array2<f32>,
    pub alt_probs: Array2<f32>,
}

impl SnpPredictions {
    pub fn len(&self) -> usize {
        self.snps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snps.is_empty()
    }

    /// `CHR_POS0_REF_ALT` of every row.
    pub fn rsids(&self) -> Vec<String> {
        self.snps.iter().map(|s| s.id()).collect()
    }
}

fn check_output(output: &ModelOutput, n: usize, output_len: usize) -> Result<()> {
    let shape = output.profile_logits.shape();
    if shape != [n, output_len] {
        return Err(SnpScoreError::ShapeMismatch {
            what: "profile logits",
            expected: vec![n, output_len],
            found: shape.to_vec(),
        });
    }
    if output.log_counts.len() != n {
        return Err(SnpScoreError::ShapeMismatch {
            what: "log counts",
            expected: vec![n],
            found: vec![output.log_counts.len()],
        });
    }
    Ok(())
}

///
/// Run the model over every batch of the generator, reference allele first, then the
/// alternate allele, and collect log counts and profile probabilities.
///
pub fn fetch_snp_predictions<G, M>(generator: &G, model: &M) -> Result<SnpPredictions>
where
    G: SequenceWindowGenerator + ?Sized,
    M: ProfileModel + ?Sized,
{
    let input_len = generator.input_len();
    if input_len != model.input_len() {
        return Err(SnpScoreError::ShapeMismatch {
            what: "window length",
            expected: vec![model.input_len()],
            found: vec![input_len],
        });
    }
    let output_len = model.output_len();

    let mut snps = Vec::new();
    let mut ref_logcounts = Vec::new();
    let mut alt_logcounts = Vec::new();
    let mut ref_probs = Vec::new();
    let mut alt_probs = Vec::new();

    let pb = ProgressBar::new(generator.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches ({eta})")
            .map_err(|e| SnpScoreError::ProgressTemplate(e.to_string()))?
            .progress_chars("##-"),
    );

    for batch in generator.batches() {
        let batch = batch?;
        let n = batch.len();

        let ref_seqs: Vec<&[u8]> = batch.iter().map(|w| w.ref_seq.as_slice()).collect();
        let alt_seqs: Vec<&[u8]> = batch.iter().map(|w| w.alt_seq.as_slice()).collect();

        let ref_output = model.predict(&one_hot_encode(&ref_seqs, input_len)?)?;
        check_output(&ref_output, n, output_len)?;
        let alt_output = model.predict(&one_hot_encode(&alt_seqs, input_len)?)?;
        check_output(&alt_output, n, output_len)?;

        ref_logcounts.extend(ref_output.log_counts.iter());
        alt_logcounts.extend(alt_output.log_counts.iter());
        ref_probs.extend(softmax(&ref_output.profile_logits).iter());
        alt_probs.extend(softmax(&alt_output.profile_logits).iter());
        snps.extend(batch.into_iter().map(|w| w.snp));

        pb.inc(1);
    }
    pb.finish_and_clear();

    let n = snps.len();
    debug!("Collected predictions for {} SNPs", n);

    let to_matrix = |values: Vec<f32>| {
        let found = vec![values.len()];
        Array2::from_shape_vec((n, output_len), values).map_err(|_| SnpScoreError::ShapeMismatch {
            what: "probabilities",
            expected: vec![n * output_len],
            found,
        })
    };

    let predictions = SnpPredictions {
        snps,
        ref_logcounts: Array1::from(ref_logcounts),
        alt_logcounts: Array1::from(alt_logcounts),
        ref_probs: to_matrix(ref_probs)?,
        alt_probs: to_matrix(alt_probs)?,
    };

    info!("Predicted {} SNPs", predictions.len());

    Ok(predictions)
}
