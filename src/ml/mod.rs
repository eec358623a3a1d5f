// ============================================================
// Layer 5 - ML / Model Layer (Burn)
// ============================================================
// Burn framework code for the network and its training:
//
//   model.rs     - embedding -> conv1d -> max-pool -> dense
//                  classifier with softmax outputs
//
//   loss.rs      - binary cross-entropy on probabilities
//
//   trainer.rs   - epoch loop: RMSProp steps over shuffled
//                  batches, then an evaluation pass
//
//   evaluator.rs - summed BCE / samples and arg-max accuracy
//                  over an evaluation loader
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Kim (2014) Convolutional Neural Networks for
//            Sentence Classification

use burn::backend::{Autodiff, NdArray, Wgpu};

/// Text CNN architecture
pub mod model;

/// Binary cross-entropy
pub mod loss;

/// Training loop
pub mod trainer;

/// Evaluation pass
pub mod evaluator;

/// GPU backend (Vulkan / Metal / DX12 through wgpu)
pub type GpuBackend = Wgpu;
pub type GpuTrainBackend = Autodiff<Wgpu>;

/// CPU backend
pub type CpuBackend = NdArray;
pub type CpuTrainBackend = Autodiff<NdArray>;
