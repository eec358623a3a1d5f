// ============================================================
// Layer 4 - Embedding Matrix Loader
// ============================================================
// Loads the precomputed word-vector table that initialises the
// classifier's embedding layer. Row i is the vector for token id i.

use anyhow::{ensure, Result};
use burn::prelude::*;
use ndarray::Array2;
use std::path::Path;

use crate::data::arrays::read_float_matrix;

pub const EMBEDDING_MATRIX_FILE: &str = "docs-embedding-matrix.npy";

/// Dense (vocab_size × dim) table stored row-major.
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
    pub vocab_size: usize,
    pub dim:        usize,
    values:         Vec<f32>,
}

impl EmbeddingMatrix {
    pub fn from_array(array: Array2<f32>) -> Result<Self> {
        let (vocab_size, dim) = array.dim();
        ensure!(vocab_size > 0 && dim > 0, "embedding matrix is empty ({vocab_size}x{dim})");
        let values = array.iter().copied().collect();
        Ok(Self { vocab_size, dim, values })
    }

    pub fn into_tensor<B: Backend>(self, device: &B::Device) -> Tensor<B, 2> {
        Tensor::from_data(TensorData::new(self.values, [self.vocab_size, self.dim]), device)
    }
}

/// Read `docs-embedding-matrix.npy` from `dir`.
pub fn load_embeddings(dir: impl AsRef<Path>) -> Result<EmbeddingMatrix> {
    let path   = dir.as_ref().join(EMBEDDING_MATRIX_FILE);
    let matrix = EmbeddingMatrix::from_array(read_float_matrix(&path)?)?;
    tracing::info!(
        "Loaded embedding matrix from '{}': vocab={}, dim={}",
        path.display(),
        matrix.vocab_size,
        matrix.dim,
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use ndarray::array;
    use ndarray_npy::write_npy;

    #[test]
    fn test_load_embeddings_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_npy(
            dir.path().join(EMBEDDING_MATRIX_FILE),
            &array![[0.1f64, 0.2, 0.3], [0.4, 0.5, 0.6]],
        )
        .unwrap();

        let m = load_embeddings(dir.path()).unwrap();
        assert_eq!((m.vocab_size, m.dim), (2, 3));
        let v: Vec<f32> = m.into_tensor::<NdArray>(&Default::default()).into_data().iter::<f32>().collect();
        assert_eq!(v[4], 0.5);
    }

    #[test]
    fn test_into_tensor_keeps_row_order() {
        let m = EmbeddingMatrix::from_array(array![[1.0f32, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let t = m.into_tensor::<NdArray>(&Default::default());
        assert_eq!(t.dims(), [3, 2]);
        let v: Vec<f32> = t.into_data().iter::<f32>().collect();
        assert_eq!(v, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_missing_matrix_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_embeddings(dir.path()).is_err());
    }
}
