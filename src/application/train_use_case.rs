// ============================================================
// Layer 2 - TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load train / test splits            (Layer 4 - data)
//   Step 2: Load the embedding matrix           (Layer 4 - data)
//   Step 3: Derive the network config           (Layer 5 - ml)
//   Step 4: Build the network, embeddings frozen (Layer 5 - ml)
//   Step 5: Save train config, open metrics log (Layer 6 - infra)
//   Step 6: Run training loop                   (Layer 5 - ml)
//   Step 7: Persist model artifacts             (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};

use crate::data::{
    embeddings::load_embeddings,
    loader::{load_testing_data, load_training_data},
};
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::{
    model::TextCnnConfig,
    trainer::{run_training, TrainOutcome},
};

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters and directories for a training run.
// Serialisable so it can be written next to the model artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs:          usize,
    pub learning_rate:   f64,
    pub num_classes:     usize,
    pub vocab_size:      usize,
    pub batch_size:      usize,
    pub seed:            u64,
    pub output_data_dir: String,
    pub model_dir:       String,
    pub train_dir:       String,
    pub test_dir:        String,
    pub embeddings_dir:  String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs:          1,
            learning_rate:   0.001,
            num_classes:     4,
            vocab_size:      400_000,
            batch_size:      16,
            seed:            42,
            output_data_dir: "output".to_string(),
            model_dir:       "model".to_string(),
            train_dir:       "data/train".to_string(),
            test_dir:        "data/test".to_string(),
            embeddings_dir:  "data/embeddings".to_string(),
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Execute the full training pipeline end to end on backend `B`.
    pub fn execute<B: AutodiffBackend>(&self, device: B::Device) -> Result<TrainOutcome<B>> {
        let cfg = &self.config;

        // ── Step 1: Load pre-split arrays ─────────────────────────────────────
        let train_dataset = load_training_data(&cfg.train_dir)?;
        let test_dataset  = load_testing_data(&cfg.test_dir)?;

        // ── Step 2: Load the word-vector table ────────────────────────────────
        let matrix = load_embeddings(&cfg.embeddings_dir)?;
        if matrix.vocab_size != cfg.vocab_size {
            tracing::warn!(
                "vocab_size={} but the embedding matrix has {} rows; using the matrix",
                cfg.vocab_size,
                matrix.vocab_size,
            );
        }
        train_dataset.check_fits(cfg.num_classes, matrix.vocab_size, "train")?;
        test_dataset.check_fits(cfg.num_classes, matrix.vocab_size, "test")?;

        // ── Step 3: Network config follows the data ───────────────────────────
        let model_cfg = TextCnnConfig::new(matrix.vocab_size, train_dataset.seq_len())
            .with_num_classes(cfg.num_classes)
            .with_embedding_dim(matrix.dim);
        let flat = model_cfg.flattened_features()?;
        tracing::info!(
            "Network: seq_len={}, embedding_dim={}, flattened features={}, classes={}",
            model_cfg.seq_len,
            model_cfg.embedding_dim,
            flat,
            model_cfg.num_classes,
        );

        // ── Step 4: Build the model ───────────────────────────────────────────
        B::seed(cfg.seed);
        let model = model_cfg.init_with_embeddings::<B>(matrix, &device)?;

        // ── Step 5: Record the run configuration ──────────────────────────────
        let ckpt    = CheckpointManager::new(&cfg.model_dir)?;
        ckpt.save_train_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.output_data_dir)?;
        tracing::info!("Epoch metrics go to '{}'", metrics.csv_path().display());

        // ── Step 6: Training loop ─────────────────────────────────────────────
        let outcome = run_training(
            cfg, model, train_dataset, test_dataset, &device, Some(&metrics),
        )?;

        // ── Step 7: Persist ───────────────────────────────────────────────────
        ckpt.save_trained(&outcome.model, &model_cfg)?;
        ckpt.save_architecture::<B>(&model_cfg, &device)?;

        Ok(outcome)
    }
}
