use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use ndarray::{Array1, Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

use crate::consts::NUCLEOTIDES;
use crate::errors::{Result, SnpScoreError};

///
/// Raw predictions for a batch: profile logits `[batch, output_len]` and one
/// log total count per sequence.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub profile_logits: Array2<f32>,
    pub log_counts: Array1<f32>,
}

///
/// A base-resolution profile model: one-hot sequence in, profile logits and log counts out.
///
pub trait ProfileModel {
    fn input_len(&self) -> usize;
    fn output_len(&self) -> usize;

    /// `batch` is `[batch, input_len, 4]`.
    fn predict(&self, batch: &Array3<f32>) -> Result<ModelOutput>;
}

///
/// A small serialized profile model.
///
/// The profile head scans a `k x 4` kernel over the central `output_len` bases of
/// the input (zero padded past the input edges) and adds `profile_bias`. The count
/// head is `count_bias + count_scale * ln(sum(exp(logits)))`.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConvModel {
    pub input_len: usize,
    pub output_len: usize,
    pub kernel: Vec<[f32; 4]>,
    #[serde(default)]
    pub profile_bias: f32,
    #[serde(default)]
    pub count_bias: f32,
    #[serde(default = "default_count_scale")]
    pub count_scale: f32,
}

fn default_count_scale() -> f32 {
    1.0
}

impl LinearConvModel {
    ///
    /// Load a model from its JSON file and validate its dimensions.
    ///
    pub fn from_file(path: &Path) -> Result<Self> {
        let load_error = |reason: String| SnpScoreError::ModelLoad {
            path: path.display().to_string(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
        let model: LinearConvModel =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| load_error(e.to_string()))?;
        model.validate()?;

        info!(
            "Loaded model {} (input length {}, output length {}, kernel width {})",
            path.display(),
            model.input_len,
            model.output_len,
            model.kernel.len()
        );

        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_len == 0 || self.output_len == 0 {
            return Err(SnpScoreError::InvalidModel(String::from(
                "input and output lengths must be positive",
            )));
        }
        if self.output_len > self.input_len {
            return Err(SnpScoreError::InvalidModel(format!(
                "output length {} exceeds input length {}",
                self.output_len, self.input_len
            )));
        }
        if self.kernel.is_empty() {
            return Err(SnpScoreError::InvalidModel(String::from("empty kernel")));
        }
        Ok(())
    }

    fn profile_logits(&self, batch: &Array3<f32>) -> Array2<f32> {
        let n = batch.len_of(Axis(0));
        let offset = ((self.input_len - self.output_len) / 2) as i64;
        let k_half = (self.kernel.len() / 2) as i64;

        let mut logits = Array2::<f32>::from_elem((n, self.output_len), self.profile_bias);
        for b in 0..n {
            for j in 0..self.output_len {
                let centre = offset + j as i64;
                let mut acc = 0.0;
                for (t, weights) in self.kernel.iter().enumerate() {
                    let pos = centre + t as i64 - k_half;
                    if pos < 0 || pos >= self.input_len as i64 {
                        continue;
                    }
                    for (c, w) in weights.iter().enumerate() {
                        acc += w * batch[[b, pos as usize, c]];
                    }
                }
                logits[[b, j]] += acc;
            }
        }
        logits
    }
}

/// `ln(sum(exp(x)))`, shifted by the max for stability.
fn log_sum_exp(row: ndarray::ArrayView1<f32>) -> f32 {
    let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    if !max.is_finite() {
        return max;
    }
    max + row.iter().map(|v| (v - max).exp()).sum::<f32>().ln()
}

impl ProfileModel for LinearConvModel {
    fn input_len(&self) -> usize {
        self.input_len
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn predict(&self, batch: &Array3<f32>) -> Result<ModelOutput> {
        let shape = batch.shape();
        if shape[1] != self.input_len || shape[2] != NUCLEOTIDES.len() {
            return Err(SnpScoreError::ShapeMismatch {
                what: "model input",
                expected: vec![shape[0], self.input_len, NUCLEOTIDES.len()],
                found: shape.to_vec(),
            });
        }

        let profile_logits = self.profile_logits(batch);
        let log_counts = profile_logits
            .axis_iter(Axis(0))
            .map(|row| self.count_bias + self.count_scale * log_sum_exp(row))
            .collect::<Array1<f32>>();

        Ok(ModelOutput {
            profile_logits,
            log_counts,
        })
    }
}
