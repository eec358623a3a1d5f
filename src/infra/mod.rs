// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns that write to disk:
//
//   checkpoint.rs - model.pt export, trained-weight checkpoint
//                   (gzipped Burn record) and config JSON files
//                   in the model directory
//
//   metrics.rs    - per-epoch metrics appended to a CSV file in
//                   the output-data directory
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model export, checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
