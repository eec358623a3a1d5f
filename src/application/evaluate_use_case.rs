// ============================================================
// Layer 2 - EvaluateUseCase
// ============================================================
// Re-scores a finished training run against a test split:
//
//   Step 1: Rebuild the trained network            (Layer 6 - infra)
//   Step 2: Load the test split, check it fits the
//           network's classes and embedding table  (Layer 4 - data)
//   Step 3: Summed BCE / samples, accuracy         (Layer 5 - ml)

use anyhow::Result;
use burn::prelude::*;

use crate::data::loader::{eval_loader, load_testing_data};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::evaluator::{evaluate, EvalReport};

pub struct EvaluateUseCase {
    model_dir: String,
    test_dir:  String,
}

impl EvaluateUseCase {
    pub fn new(model_dir: String, test_dir: String) -> Self {
        Self { model_dir, test_dir }
    }

    pub fn execute<B: Backend>(&self, device: B::Device) -> Result<EvalReport> {
        let ckpt = CheckpointManager::new(&self.model_dir)?;
        let (config, model) = ckpt.load_trained::<B>(&device)?;
        tracing::debug!("Rebuilt network: seq_len={}, classes={}", config.seq_len, config.num_classes);

        let dataset = load_testing_data(&self.test_dir)?;
        dataset.check_fits(config.num_classes, config.vocab_size, "test")?;
        let loader  = eval_loader::<B>(dataset, device)?;

        println!("Evaluating model");
        let report = evaluate(&model, &loader)?;
        println!("val_loss: {:.4}", report.mean_loss);
        println!("val_acc: {:.4}", report.accuracy);
        Ok(report)
    }
}
