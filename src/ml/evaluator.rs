// ============================================================
// Layer 5 - Evaluation Routine
// ============================================================
// Scores a model over every batch of an evaluation loader.
//
// The model passed in is expected to live on a non-autodiff
// backend (e.g. the result of `model.valid()`), which means:
//   - dropout is a no-op
//   - no gradient graph is recorded
//   - parameters are only read
//
// Loss is summed over every element of every batch and then
// divided by the number of samples, matching how the validation
// loss has always been reported.

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::DataLoader,
    nn::loss::Reduction,
    prelude::*,
};
use serde::Serialize;
use std::sync::Arc;

use crate::data::batcher::TextBatch;
use crate::ml::{loss::binary_cross_entropy, model::TextCnn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalReport {
    /// Summed BCE divided by the sample count
    pub mean_loss: f64,
    /// Fraction of samples whose arg-max prediction matches the arg-max label
    pub accuracy:  f64,
    pub samples:   usize,
}

pub fn evaluate<B: Backend>(
    model:  &TextCnn<B>,
    loader: &Arc<dyn DataLoader<TextBatch<B>>>,
) -> Result<EvalReport> {
    let mut loss_sum = 0.0f64;
    let mut correct  = 0usize;
    let mut samples  = 0usize;

    for batch in loader.iter() {
        let batch_len = batch.len();
        let probs = model.try_forward(batch.token_ids)?;

        let loss = binary_cross_entropy(probs.clone(), batch.labels.clone(), Reduction::Sum);
        loss_sum += loss.into_scalar().elem::<f64>();

        // argmax(1) keeps the reduced dim: both sides are [batch, 1]
        let predicted = probs.argmax(1);
        let expected  = batch.labels.argmax(1);
        let hits: i64 = predicted.equal(expected).int().sum().into_scalar().elem::<i64>();

        correct += hits as usize;
        samples += batch_len;
    }

    ensure!(samples > 0, "evaluation loader produced no samples");

    let report = EvalReport {
        mean_loss: loss_sum / samples as f64,
        accuracy:  correct as f64 / samples as f64,
        samples,
    };
    tracing::debug!(
        "Evaluated {} samples: loss={:.6}, acc={:.4}",
        report.samples,
        report.mean_loss,
        report.accuracy,
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{dataset::TextDataset, loader::eval_loader};
    use crate::domain::sample::TextSample;
    use crate::ml::model::TextCnnConfig;
    use crate::data::batcher::TextBatcher;
    use burn::backend::NdArray;
    use burn::data::dataloader::batcher::Batcher;

    type TestBackend = NdArray;

    fn samples(n: usize) -> Vec<TextSample> {
        (0..n)
            .map(|i| {
                let ids = (0..40).map(|j| ((i * 3 + j) % 30) as i32).collect();
                let mut label = vec![0.0; 4];
                label[i % 4] = 1.0;
                TextSample::new(ids, label)
            })
            .collect()
    }

    #[test]
    fn test_mean_loss_is_total_over_samples() {
        let device = Default::default();
        let model: TextCnn<TestBackend> = TextCnnConfig::new(30, 40).init(&device).unwrap();
        let items = samples(6);

        let loader = eval_loader::<TestBackend>(
            TextDataset::from_samples(&items).unwrap(),
            device.clone(),
        )
        .unwrap();
        let report = evaluate(&model, &loader).unwrap();

        // Same quantity computed in one batch
        let batch = TextBatcher::<TestBackend>::new(device).batch(items);
        let total = binary_cross_entropy(
            model.forward(batch.token_ids),
            batch.labels,
            Reduction::Sum,
        )
        .into_scalar()
        .elem::<f64>();

        assert_eq!(report.samples, 6);
        assert!((report.mean_loss - total / 6.0).abs() < 1e-4);
        assert!((0.0..=1.0).contains(&report.accuracy));
    }

    #[test]
    fn test_evaluation_does_not_touch_parameters() {
        let device = Default::default();
        let model: TextCnn<TestBackend> = TextCnnConfig::new(30, 40).init(&device).unwrap();
        let before: Vec<f32> = model.fc2.weight.val().into_data().iter::<f32>().collect();

        let loader = eval_loader::<TestBackend>(
            TextDataset::from_samples(&samples(4)).unwrap(),
            device.clone(),
        )
        .unwrap();
        evaluate(&model, &loader).unwrap();
        evaluate(&model, &loader).unwrap();

        let after: Vec<f32> = model.fc2.weight.val().into_data().iter::<f32>().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_wrong_width_aborts_evaluation() {
        let device = Default::default();
        let model: TextCnn<TestBackend> = TextCnnConfig::new(30, 41).init(&device).unwrap();
        let loader = eval_loader::<TestBackend>(
            TextDataset::from_samples(&samples(2)).unwrap(),
            device,
        )
        .unwrap();
        assert!(evaluate(&model, &loader).is_err());
    }
}
