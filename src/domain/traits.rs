// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The training and evaluation code only needs indexed access to
// samples. Keeping that behind a trait means the in-memory
// `.npy` dataset could be swapped for a memory-mapped or
// streamed source without touching the loaders.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::sample::TextSample;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Anything that can hand out classification samples by index.
///
/// Implementations:
///   - TextDataset → paired feature/label arrays loaded from `.npy`
pub trait SampleSource {
    /// Number of samples available.
    fn length(&self) -> usize;

    /// The sample at `index`. Fails when `index >= length()`.
    fn item_at(&self, index: usize) -> Result<TextSample>;
}
