use anyhow::Result;
use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        loss::Reduction,
        pool::{MaxPool1d, MaxPool1dConfig},
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, softmax},
};

use crate::data::embeddings::EmbeddingMatrix;
use crate::domain::shape::{self, ShapeError};
use crate::ml::loss::binary_cross_entropy;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct TextCnnConfig {
    /// Rows in the embedding table
    pub vocab_size: usize,
    /// Width of every input sequence; fixes the flatten size
    pub seq_len:    usize,
    #[config(default = 4)]
    pub num_classes: usize,
    #[config(default = 100)]
    pub embedding_dim: usize,
    #[config(default = 128)]
    pub conv_channels: usize,
    #[config(default = 3)]
    pub kernel_size: usize,
    #[config(default = 5)]
    pub pool_size: usize,
    #[config(default = 128)]
    pub hidden_size: usize,
    #[config(default = 0.3)]
    pub dropout: f64,
}

impl TextCnnConfig {
    /// Features left after conv → pool → flatten for `seq_len`.
    pub fn flattened_features(&self) -> Result<usize, ShapeError> {
        shape::flattened_features(
            self.seq_len,
            self.kernel_size,
            self.pool_size,
            self.conv_channels,
        )
    }

    /// Build a network with a randomly initialised, frozen embedding table.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<TextCnn<B>, ShapeError> {
        let flat = self.flattened_features()?;

        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim)
            .init(device)
            .no_grad();
        let conv = Conv1dConfig::new(self.embedding_dim, self.conv_channels, self.kernel_size)
            .init(device);
        // Burn defaults the pool stride to 1; the windows here must not overlap.
        let pool = MaxPool1dConfig::new(self.pool_size)
            .with_stride(self.pool_size)
            .init();
        let dropout = DropoutConfig::new(self.dropout).init();
        let fc1 = LinearConfig::new(flat, self.hidden_size).init(device);
        let fc2 = LinearConfig::new(self.hidden_size, self.num_classes).init(device);

        Ok(TextCnn {
            embedding, conv, pool, dropout, fc1, fc2,
            seq_len: self.seq_len,
        })
    }

    /// Build a network whose embedding table is copied from `matrix` and frozen.
    pub fn init_with_embeddings<B: Backend>(
        &self,
        matrix: EmbeddingMatrix,
        device: &B::Device,
    ) -> Result<TextCnn<B>> {
        if matrix.vocab_size != self.vocab_size {
            return Err(ShapeError::Mismatch {
                what: "embedding matrix rows",
                expected: self.vocab_size,
                actual: matrix.vocab_size,
            }.into());
        }
        if matrix.dim != self.embedding_dim {
            return Err(ShapeError::Mismatch {
                what: "embedding matrix columns",
                expected: self.embedding_dim,
                actual: matrix.dim,
            }.into());
        }

        let mut model = self.init::<B>(device)?;
        model.embedding.weight = burn::module::Param::from_tensor(matrix.into_tensor(device));
        model.embedding = model.embedding.no_grad();
        Ok(model)
    }
}

#[derive(Module, Debug)]
pub struct TextCnn<B: Backend> {
    pub embedding: Embedding<B>,
    pub conv:      Conv1d<B>,
    pub pool:      MaxPool1d,
    pub dropout:   Dropout,
    pub fc1:       Linear<B>,
    pub fc2:       Linear<B>,
    pub seq_len:   usize,
}

impl<B: Backend> TextCnn<B> {
    /// token_ids: [batch, seq_len] → class probabilities: [batch, num_classes]
    pub fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(token_ids);   // [batch, seq_len, emb]
        let x = x.swap_dims(1, 2);                    // [batch, emb, seq_len]
        let x = self.conv.forward(x);                 // [batch, channels, seq_len - k + 1]
        let x = self.pool.forward(x);                 // [batch, channels, pooled]
        let x = x.flatten::<2>(1, 2);                 // [batch, channels * pooled]
        let x = self.dropout.forward(x);
        let x = relu(self.fc1.forward(x));
        softmax(self.fc2.forward(x), 1)
    }

    /// Reject inputs whose width differs from the one the fully-connected
    /// layer was sized for.
    pub fn check_input(&self, token_ids: &Tensor<B, 2, Int>) -> Result<(), ShapeError> {
        let [_, width] = token_ids.dims();
        if width != self.seq_len {
            return Err(ShapeError::InputWidth { expected: self.seq_len, actual: width });
        }
        Ok(())
    }

    pub fn try_forward(&self, token_ids: Tensor<B, 2, Int>) -> Result<Tensor<B, 2>, ShapeError> {
        self.check_input(&token_ids)?;
        Ok(self.forward(token_ids))
    }

    /// Mean binary cross-entropy between predictions and label vectors.
    pub fn forward_loss(
        &self,
        token_ids: Tensor<B, 2, Int>,
        labels:    Tensor<B, 2>,
    ) -> Result<(Tensor<B, 1>, Tensor<B, 2>), ShapeError> {
        let probs = self.try_forward(token_ids)?;
        let loss  = binary_cross_entropy(probs.clone(), labels, Reduction::Mean);
        Ok((loss, probs))
    }
}
