// ============================================================
// Layer 3 - Conv / Pool Shape Arithmetic
// ============================================================
// The fully-connected layer after the convolution stack needs to
// know how many features the flatten step produces. That number
// depends on the input sequence length:
//
//   conv  (kernel k, stride 1, no padding):  L  → L - k + 1
//   pool  (window p, stride p):              L' → (L' - p) / p + 1
//   flatten:                                 channels × pooled length
//
// With L = 40, k = 3, p = 5 and 128 channels this gives 896,
// the width the classifier has always been trained with.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("sequence length {len} is shorter than the convolution kernel ({kernel})")]
    TooShortForKernel { len: usize, kernel: usize },

    #[error("convolution output length {len} is shorter than the pooling window ({window})")]
    TooShortForPool { len: usize, window: usize },

    #[error("input width {actual} does not match the configured sequence length {expected}")]
    InputWidth { expected: usize, actual: usize },

    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Output length of a stride-1, unpadded 1-D convolution.
pub fn conv_output_len(len: usize, kernel: usize) -> Result<usize, ShapeError> {
    if kernel == 0 || len < kernel {
        return Err(ShapeError::TooShortForKernel { len, kernel });
    }
    Ok(len - kernel + 1)
}

/// Output length of a non-overlapping max-pool (stride = window).
/// Trailing positions that do not fill a window are dropped.
pub fn pool_output_len(len: usize, window: usize) -> Result<usize, ShapeError> {
    if window == 0 || len < window {
        return Err(ShapeError::TooShortForPool { len, window });
    }
    Ok((len - window) / window + 1)
}

/// Number of features produced by conv → pool → flatten.
pub fn flattened_features(
    seq_len: usize,
    kernel: usize,
    pool: usize,
    channels: usize,
) -> Result<usize, ShapeError> {
    let conv = conv_output_len(seq_len, kernel)?;
    let pooled = pool_output_len(conv, pool)?;
    Ok(pooled * channels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_width_gives_896() {
        assert_eq!(flattened_features(40, 3, 5, 128), Ok(896));
    }

    #[test]
    fn test_lengths_sharing_the_same_pooled_width() {
        // conv output 35..=39 all pool down to 7 windows
        for len in 37..=41 {
            assert_eq!(flattened_features(len, 3, 5, 128), Ok(896), "len={len}");
        }
        assert_eq!(flattened_features(36, 3, 5, 128), Ok(768));
        assert_eq!(flattened_features(42, 3, 5, 128), Ok(1024));
    }

    #[test]
    fn test_too_short_for_kernel() {
        assert_eq!(
            conv_output_len(2, 3),
            Err(ShapeError::TooShortForKernel { len: 2, kernel: 3 })
        );
    }

    #[test]
    fn test_too_short_for_pool() {
        // conv output = 4, window = 5
        assert_eq!(
            flattened_features(6, 3, 5, 128),
            Err(ShapeError::TooShortForPool { len: 4, window: 5 })
        );
    }

    #[test]
    fn test_pool_drops_partial_window() {
        assert_eq!(pool_output_len(9, 5), Ok(1));
        assert_eq!(pool_output_len(10, 5), Ok(2));
    }
}
