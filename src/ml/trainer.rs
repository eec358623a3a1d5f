// ============================================================
// Layer 5 - Training Loop
// ============================================================
// Train + evaluate loop using Burn's DataLoader and RMSProp.
//
// Per epoch:
//   - every shuffled training batch: forward → BCE → backward →
//     optimiser step (frozen embedding params receive no grads)
//   - near the end of the epoch print `epoch:` / `train_loss:`
//   - model.valid() drops to the inner backend (dropout off,
//     no autodiff graph) for the evaluation pass
//
// Burn recomputes gradients from scratch on every backward(),
// so there is no separate zero-grad step.
//
// Reference: Burn Book §5, Hinton (2012) Lecture 6e (RMSProp)

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer, RmsPropConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::TextBatch,
    dataset::TextDataset,
    loader::{eval_loader, train_loader},
};
use crate::domain::traits::SampleSource;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::{evaluator::evaluate, model::TextCnn};

pub struct TrainOutcome<B: AutodiffBackend> {
    pub model:   TextCnn<B>,
    pub history: Vec<EpochMetrics>,
}

/// RMSProp with alpha 0.99 and epsilon 1e-8, no momentum.
pub fn rmsprop<B: AutodiffBackend>() -> impl Optimizer<TextCnn<B>, B> {
    RmsPropConfig::new()
        .with_alpha(0.99)
        .with_epsilon(1e-8)
        .init::<B, TextCnn<B>>()
}

/// One forward / backward / optimiser step. Returns the updated model
/// and the batch loss.
pub fn train_step<B, O>(
    model: TextCnn<B>,
    optim: &mut O,
    batch: TextBatch<B>,
    lr:    f64,
) -> Result<(TextCnn<B>, f64)>
where
    B: AutodiffBackend,
    O: Optimizer<TextCnn<B>, B>,
{
    let (loss, _) = model.forward_loss(batch.token_ids, batch.labels)?;
    let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

    let grads = loss.backward();
    let grads = GradientsParams::from_grads(grads, &model);
    Ok((optim.step(lr, model, grads), loss_val))
}

/// True once fewer than one batch worth of samples remain after
/// `batch_idx` (1-based) batches.
pub fn reports_progress(dataset_len: usize, batch_idx: usize, batch_size: usize) -> bool {
    dataset_len.saturating_sub(batch_idx * batch_size) <= batch_size
}

pub fn run_training<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    model:         TextCnn<B>,
    train_dataset: TextDataset,
    test_dataset:  TextDataset,
    device:        &B::Device,
    metrics:       Option<&MetricsLogger>,
) -> Result<TrainOutcome<B>> {
    let train_len = train_dataset.length();

    // ── Data loaders ──────────────────────────────────────────────────────────
    let train_loader = train_loader::<B>(train_dataset, cfg.batch_size, cfg.seed, device.clone())?;
    let test_loader  = eval_loader::<B::InnerBackend>(test_dataset, device.clone())?;

    let mut optim   = rmsprop::<B>();
    let mut model   = model;
    let mut history = Vec::with_capacity(cfg.epochs);
    let mut best_val_loss = f64::INFINITY;

    tracing::info!(
        "Training for {} epoch(s): {} samples, batch_size={}, lr={}",
        cfg.epochs, train_len, cfg.batch_size, cfg.learning_rate,
    );

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut last_loss = f64::NAN;
        let mut loss_sum  = 0.0f64;
        let mut batches   = 0usize;

        for (batch_idx, batch) in (1..).zip(train_loader.iter()) {
            let (next, loss) = train_step(model, &mut optim, batch, cfg.learning_rate)?;
            model = next;

            last_loss = loss;
            loss_sum += loss;
            batches  += 1;

            if reports_progress(train_len, batch_idx, cfg.batch_size) {
                println!("epoch: {epoch}");
                println!("train_loss: {loss:.6}");
            }
        }

        let mean_train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };

        // ── Evaluation phase ──────────────────────────────────────────────────
        println!("Evaluating model");
        let report = evaluate(&model.valid(), &test_loader)?;
        println!("val_loss: {:.4}", report.mean_loss);
        println!("val_acc: {:.4}", report.accuracy);

        let row = EpochMetrics::new(
            epoch, last_loss, mean_train_loss, report.mean_loss, report.accuracy,
        );
        if row.is_improvement(best_val_loss) {
            best_val_loss = row.val_loss;
            tracing::info!("Epoch {} improved val_loss to {:.4}", epoch, row.val_loss);
        }
        if let Some(logger) = metrics {
            logger.log(&row)?;
        }
        history.push(row);
    }

    tracing::info!("Training complete!");
    Ok(TrainOutcome { model, history })
}
