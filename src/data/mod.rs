// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between the `.npy` files on disk and the tensor
// batches the training loop consumes:
//
//   train_X.npy / train_Y.npy
//       │
//       ▼
//   arrays         → reads NumPy arrays, casts dtypes
//       │
//       ▼
//   TextDataset    → indexed (token ids, label) samples
//       │
//       ▼
//   TextBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader     → shuffled training / ordered evaluation batches
//
//   docs-embedding-matrix.npy → EmbeddingMatrix → embedding layer
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads 2-D `.npy` arrays with dtype fallback
pub mod arrays;

/// Paired feature/label arrays behind Burn's Dataset trait
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Split loading and train/eval DataLoader construction
pub mod loader;

/// Pretrained word-vector table
pub mod embeddings;
