// ============================================================
// Layer 5 - Binary Cross-Entropy
// ============================================================
// The classifier ends in a softmax, so the loss works on
// probabilities rather than logits:
//
//   bce(p, t) = -( t·ln(p) + (1 - t)·ln(1 - p) )
//
// evaluated element-wise over [batch, classes] and then averaged
// (training) or summed (evaluation). Probabilities are clamped
// away from 0 and 1 first so neither log nor its gradient blows up.

use burn::{nn::loss::Reduction, prelude::*};

const PROB_EPSILON: f32 = 1e-7;

pub fn binary_cross_entropy<B: Backend>(
    probs:     Tensor<B, 2>,
    targets:   Tensor<B, 2>,
    reduction: Reduction,
) -> Tensor<B, 1> {
    let probs = probs.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON);

    let positive = targets.clone() * probs.clone().log();
    let negative = (targets.neg() + 1.0) * (probs.neg() + 1.0).log();
    let elementwise = (positive + negative).neg();

    match reduction {
        Reduction::Sum => elementwise.sum(),
        Reduction::Mean | Reduction::Auto => elementwise.mean(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn t(rows: &[[f32; 2]]) -> Tensor<TestBackend, 2> {
        let flat: Vec<f32> = rows.iter().flatten().copied().collect();
        Tensor::<TestBackend, 1>::from_floats(flat.as_slice(), &Default::default())
            .reshape([rows.len(), 2])
    }

    fn scalar(x: Tensor<TestBackend, 1>) -> f64 {
        x.into_scalar().elem::<f64>()
    }

    #[test]
    fn test_uniform_prediction() {
        let probs   = t(&[[0.5, 0.5]]);
        let targets = t(&[[1.0, 0.0]]);
        let ln2 = std::f64::consts::LN_2;

        let mean = scalar(binary_cross_entropy(probs.clone(), targets.clone(), Reduction::Mean));
        let sum  = scalar(binary_cross_entropy(probs, targets, Reduction::Sum));
        assert!((mean - ln2).abs() < 1e-5);
        assert!((sum - 2.0 * ln2).abs() < 1e-5);
    }

    #[test]
    fn test_perfect_prediction_is_near_zero() {
        let loss = scalar(binary_cross_entropy(
            t(&[[1.0, 0.0], [0.0, 1.0]]),
            t(&[[1.0, 0.0], [0.0, 1.0]]),
            Reduction::Mean,
        ));
        assert!(loss >= 0.0 && loss < 1e-5);
    }

    #[test]
    fn test_confident_wrong_prediction_stays_finite() {
        let loss = scalar(binary_cross_entropy(
            t(&[[0.0, 1.0]]),
            t(&[[1.0, 0.0]]),
            Reduction::Sum,
        ));
        assert!(loss.is_finite());
        assert!(loss > 10.0);
    }

    #[test]
    fn test_sum_is_mean_times_element_count() {
        let probs   = t(&[[0.2, 0.8], [0.6, 0.4], [0.9, 0.1]]);
        let targets = t(&[[0.0, 1.0], [1.0, 0.0], [0.0, 1.0]]);
        let mean = scalar(binary_cross_entropy(probs.clone(), targets.clone(), Reduction::Mean));
        let sum  = scalar(binary_cross_entropy(probs, targets, Reduction::Sum));
        assert!((sum - mean * 6.0).abs() < 1e-4);
    }
}
