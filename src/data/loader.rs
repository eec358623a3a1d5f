// ============================================================
// Layer 4 - Split Loader and Batch Loaders
// ============================================================
// Each data channel directory holds one pre-split pair of arrays:
//
//   train/  train_X.npy  [N, L] token ids
//           train_Y.npy  [N, C] label vectors
//   test/   test_X.npy
//           test_Y.npy
//
// The arrays become a TextDataset, which Burn's DataLoader then
// walks in batches:
//   - training:   shuffled every pass, batch size 16 by default
//   - evaluation: original order, one sample per batch
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use std::{path::Path, sync::Arc};

use crate::data::{
    arrays::{read_float_matrix, read_index_matrix},
    batcher::{TextBatch, TextBatcher},
    dataset::TextDataset,
};
use crate::domain::traits::SampleSource;

/// Batch size used by the evaluation loader.
pub const EVAL_BATCH_SIZE: usize = 1;

/// Load `{prefix}_X.npy` / `{prefix}_Y.npy` from `dir`.
pub fn load_split(dir: impl AsRef<Path>, prefix: &str) -> Result<TextDataset> {
    let dir = dir.as_ref();
    let features = read_index_matrix(&dir.join(format!("{prefix}_X.npy")))?;
    let labels   = read_float_matrix(&dir.join(format!("{prefix}_Y.npy")))?;
    let dataset  = TextDataset::new(features, labels)?;

    tracing::info!(
        "Loaded '{}' split from '{}': {} samples, seq_len={}, classes={}",
        prefix,
        dir.display(),
        dataset.length(),
        dataset.seq_len(),
        dataset.num_classes(),
    );
    Ok(dataset)
}

pub fn load_training_data(dir: impl AsRef<Path>) -> Result<TextDataset> {
    load_split(dir, "train")
}

pub fn load_testing_data(dir: impl AsRef<Path>) -> Result<TextDataset> {
    load_split(dir, "test")
}

/// Shuffled loader for the training split. The shuffle RNG is seeded
/// once and reshuffles on every call to `iter()`. Batches are built on
/// the calling thread as they are consumed.
pub fn train_loader<B: Backend>(
    dataset:    TextDataset,
    batch_size: usize,
    seed:       u64,
    device:     B::Device,
) -> Result<Arc<dyn DataLoader<TextBatch<B>>>> {
    ensure!(dataset.length() > 0, "training dataset is empty");
    ensure!(batch_size > 0, "batch size must be at least 1");

    Ok(DataLoaderBuilder::new(TextBatcher::<B>::new(device))
        .batch_size(batch_size)
        .shuffle(seed)
        .build(dataset))
}

/// In-order loader with one sample per batch. No worker threads,
/// so batches come back in dataset order.
pub fn eval_loader<B: Backend>(
    dataset: TextDataset,
    device:  B::Device,
) -> Result<Arc<dyn DataLoader<TextBatch<B>>>> {
    ensure!(dataset.length() > 0, "evaluation dataset is empty");

    Ok(DataLoaderBuilder::new(TextBatcher::<B>::new(device))
        .batch_size(EVAL_BATCH_SIZE)
        .build(dataset))
}
