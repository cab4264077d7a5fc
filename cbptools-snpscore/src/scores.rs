use ndarray::Axis;

use crate::errors::{Result, SnpScoreError};
use crate::predict::SnpPredictions;

/// Effect scores of one variant, alternate relative to reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnpEffectScores {
    pub log_counts_diff: f64,
    pub log_probs_diff_abs_sum: f64,
    pub probs_jsd_diff: f64,
}

fn check_lengths(ref_probs: &[f32], alt_probs: &[f32]) -> Result<()> {
    if ref_probs.len() != alt_probs.len() {
        return Err(SnpScoreError::LengthMismatch(ref_probs.len(), alt_probs.len()));
    }
    Ok(())
}

///
/// `sum(|ln(alt_i) - ln(ref_i)|)`. Every probability must be strictly positive.
///
pub fn log_probs_diff_abs_sum(ref_probs: &[f32], alt_probs: &[f32]) -> Result<f64> {
    check_lengths(ref_probs, alt_probs)?;

    let mut total = 0.0;
    for (i, (&r, &a)) in ref_probs.iter().zip(alt_probs.iter()).enumerate() {
        if r <= 0.0 || a <= 0.0 || r.is_nan() || a.is_nan() {
            return Err(SnpScoreError::NumericDomain(format!(
                "log of non-positive probability at index {} (ref={}, alt={})",
                i, r, a
            )));
        }
        total += ((a as f64).ln() - (r as f64).ln()).abs();
    }
    Ok(total)
}

/// `x * ln(x / y)` with the conventions `0 * ln(0 / y) = 0` and `+inf` off the domain.
fn rel_entr(x: f64, y: f64) -> f64 {
    if x > 0.0 && y > 0.0 {
        x * (x / y).ln()
    } else if x == 0.0 && y >= 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

///
/// Jensen-Shannon distance (natural log) between two distributions. Both inputs are
/// rescaled to sum to one first.
///
pub fn jensen_shannon_distance(p: &[f32], q: &[f32]) -> Result<f64> {
    check_lengths(p, q)?;

    let p_sum: f64 = p.iter().map(|&v| v as f64).sum();
    let q_sum: f64 = q.iter().map(|&v| v as f64).sum();

    let mut divergence = 0.0;
    for (&pi, &qi) in p.iter().zip(q.iter()) {
        let pi = pi as f64 / p_sum;
        let qi = qi as f64 / q_sum;
        let mi = (pi + qi) / 2.0;
        divergence += rel_entr(pi, mi) + rel_entr(qi, mi);
    }

    // rounding can leave a tiny negative divergence for near-identical inputs
    let distance = (divergence / 2.0).max(0.0).sqrt();
    if !distance.is_finite() {
        return Err(SnpScoreError::NumericDomain(format!(
            "Jensen-Shannon distance is {}",
            distance
        )));
    }
    Ok(distance)
}

///
/// Score every variant of a prediction set.
///
pub fn predict_snp_effect_scores(predictions: &SnpPredictions) -> Result<Vec<SnpEffectScores>> {
    let rows = predictions
        .ref_probs
        .axis_iter(Axis(0))
        .zip(predictions.alt_probs.axis_iter(Axis(0)));

    let mut scores = Vec::with_capacity(predictions.len());
    for (i, (ref_row, alt_row)) in rows.enumerate() {
        let ref_row = ref_row.to_vec();
        let alt_row = alt_row.to_vec();

        scores.push(SnpEffectScores {
            log_counts_diff: predictions.alt_logcounts[i] as f64
                - predictions.ref_logcounts[i] as f64,
            log_probs_diff_abs_sum: log_probs_diff_abs_sum(&ref_row, &alt_row)?,
            probs_jsd_diff: jensen_shannon_distance(&alt_row, &ref_row)?,
        });
    }
    Ok(scores)
}
