// ============================================================
// Layer 4 - Text Batcher
// ============================================================
// Implements Burn's Batcher trait to stack a Vec<TextSample>
// into tensors on the target device.
//
//   Input:  N samples, each with L token ids and C label entries
//   Output: token_ids [N, L] (Int), labels [N, C] (Float)
//
// Every sample in a dataset already has the same width, so the
// rows are flattened and reshaped without any padding.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::TextSample;

/// A batch of samples ready for the forward pass.
/// Both tensors have the batch size as their first dimension.
#[derive(Debug, Clone)]
pub struct TextBatch<B: Backend> {
    /// Vocabulary ids: [batch_size, seq_len]
    pub token_ids: Tensor<B, 2, Int>,

    /// Target label vectors: [batch_size, num_classes]
    pub labels: Tensor<B, 2>,
}

impl<B: Backend> TextBatch<B> {
    pub fn len(&self) -> usize {
        self.token_ids.dims()[0]
    }
}

/// Holds the device the batch tensors are created on.
#[derive(Clone, Debug)]
pub struct TextBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TextBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TextSample, TextBatch<B>> for TextBatcher<B> {
    fn batch(&self, items: Vec<TextSample>) -> TextBatch<B> {
        let batch_size  = items.len();
        let seq_len     = items.first().map_or(0, TextSample::seq_len);
        let num_classes = items.first().map_or(0, TextSample::num_classes);

        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.token_ids.iter().copied())
            .collect();

        let labels_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.label.iter().copied())
            .collect();

        let token_ids = Tensor::<B, 1, Int>::from_ints(
            ids_flat.as_slice(), &self.device
        ).reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1>::from_floats(
            labels_flat.as_slice(), &self.device
        ).reshape([batch_size, num_classes]);

        TextBatch { token_ids, labels }
    }
}
