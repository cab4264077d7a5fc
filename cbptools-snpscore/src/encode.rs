use ndarray::Array3;

use crate::consts::NUCLEOTIDES;
use crate::errors::{Result, SnpScoreError};

fn channel(base: u8) -> Option<usize> {
    let base = base.to_ascii_uppercase();
    NUCLEOTIDES.iter().position(|&n| n == base)
}

///
/// One-hot encode a batch of sequences into a `[batch, input_len, 4]` array with
/// channels in `A, C, G, T` order. Any other base (e.g. `N`) is all zeros.
///
pub fn one_hot_encode<T: AsRef<[u8]>>(seqs: &[T], input_len: usize) -> Result<Array3<f32>> {
    let mut encoded = Array3::<f32>::zeros((seqs.len(), input_len, NUCLEOTIDES.len()));

    for (i, seq) in seqs.iter().enumerate() {
        let seq = seq.as_ref();
        if seq.len() != input_len {
            return Err(SnpScoreError::ShapeMismatch {
                what: "sequence length",
                expected: vec![input_len],
                found: vec![seq.len()],
            });
        }

        for (j, &base) in seq.iter().enumerate() {
            if let Some(c) = channel(base) {
                encoded[[i, j, c]] = 1.0;
            }
        }
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::s;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_one_hot() {
        let encoded = one_hot_encode(&[b"ACGTN".to_vec(), b"acgta".to_vec()], 5).unwrap();

        assert_eq!(encoded.shape(), &[2, 5, 4]);
        assert_eq!(encoded.slice(s![0, 0, ..]).to_vec(), vec![1.0, 0.0, 0.0, 0.0]);
        assert_eq!(encoded.slice(s![0, 3, ..]).to_vec(), vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(encoded.slice(s![0, 4, ..]).to_vec(), vec![0.0, 0.0, 0.0, 0.0]);
        assert_eq!(encoded.slice(s![1, 1, ..]).to_vec(), vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(encoded.sum(), 9.0);
    }

    #[rstest]
    fn test_wrong_length() {
        let result = one_hot_encode(&[b"ACG".to_vec()], 4);
        assert!(matches!(result, Err(SnpScoreError::ShapeMismatch { .. })));
    }

    #[rstest]
    fn test_empty_batch() {
        let seqs: Vec<Vec<u8>> = vec![];
        let encoded = one_hot_encode(&seqs, 10).unwrap();
        assert_eq!(encoded.shape(), &[0, 10, 4]);
    }
}
