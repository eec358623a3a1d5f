// ============================================================
// Layer 3 - TextSample Domain Type
// ============================================================
// One classification example: a fixed-length sequence of
// vocabulary ids and the label vector that goes with it.
//
// The label is a vector rather than a class index because the
// training data stores one-hot (or multi-label) rows, and the
// binary cross-entropy loss compares against them directly.

#[derive(Debug, Clone, PartialEq)]
pub struct TextSample {
    /// Vocabulary ids, already padded/truncated to the dataset width
    pub token_ids: Vec<i32>,

    /// One entry per class
    pub label: Vec<f32>,
}

impl TextSample {
    pub fn new(token_ids: Vec<i32>, label: Vec<f32>) -> Self {
        Self { token_ids, label }
    }

    pub fn seq_len(&self) -> usize {
        self.token_ids.len()
    }

    pub fn num_classes(&self) -> usize {
        self.label.len()
    }
}
