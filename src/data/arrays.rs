// ============================================================
// Layer 4 - .npy Array Reader
// ============================================================
// Reads 2-D NumPy arrays with ndarray-npy.
//
// ndarray-npy only deserialises into the exact element type
// stored in the file header, but the inputs come from whatever
// the preprocessing step happened to produce: token ids are often
// int32 or float64 (pad_sequences / np.zeros defaults), labels are
// usually float32 one-hot rows. So each reader tries the common
// dtypes in turn and casts into the type the dataset wants.
//
// Reference: ndarray-npy crate documentation

use anyhow::{bail, Context, Result};
use ndarray::Array2;
use ndarray_npy::{read_npy, ReadNpyError, ReadableElement};
use std::path::Path;

/// Try to read `path` as a 2-D array of `T`.
/// Returns Ok(None) when the file is readable but stores another dtype.
fn try_read<T: ReadableElement>(path: &Path) -> Result<Option<Array2<T>>> {
    match read_npy::<_, Array2<T>>(path) {
        Ok(array) => Ok(Some(array)),
        Err(ReadNpyError::WrongDescriptor(_)) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Cannot read '{}'", path.display())),
    }
}

/// Read a matrix of vocabulary ids, casting any integer or float dtype to i64.
pub fn read_index_matrix(path: &Path) -> Result<Array2<i64>> {
    if let Some(a) = try_read::<i64>(path)? {
        return Ok(a);
    }
    if let Some(a) = try_read::<i32>(path)? {
        return Ok(a.mapv(i64::from));
    }
    if let Some(a) = try_read::<u32>(path)? {
        return Ok(a.mapv(i64::from));
    }
    if let Some(a) = try_read::<u16>(path)? {
        return Ok(a.mapv(i64::from));
    }
    if let Some(a) = try_read::<f64>(path)? {
        return Ok(a.mapv(|v| v as i64));
    }
    if let Some(a) = try_read::<f32>(path)? {
        return Ok(a.mapv(|v| v as i64));
    }
    bail!("'{}' does not hold integer or float token ids", path.display())
}

/// Read a float matrix (labels, embedding vectors), casting to f32.
pub fn read_float_matrix(path: &Path) -> Result<Array2<f32>> {
    if let Some(a) = try_read::<f32>(path)? {
        return Ok(a);
    }
    if let Some(a) = try_read::<f64>(path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    if let Some(a) = try_read::<i64>(path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    if let Some(a) = try_read::<i32>(path)? {
        return Ok(a.mapv(|v| v as f32));
    }
    if let Some(a) = try_read::<u8>(path)? {
        return Ok(a.mapv(f32::from));
    }
    bail!("'{}' does not hold a numeric matrix", path.display())
}
