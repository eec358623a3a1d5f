// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All pipeline logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    - trains the text CNN and writes model artifacts
//   2. `evaluate` - rebuilds a trained checkpoint and scores it
//
// The `--backend` flag picks the Burn backend at runtime; each
// use case is generic over it.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BackendKind, Commands, EvaluateArgs, TrainArgs};

use crate::ml::{CpuBackend, CpuTrainBackend, GpuBackend, GpuTrainBackend};

#[derive(Parser, Debug)]
#[command(
    name = "text-cnn-trainer",
    version = "0.1.0",
    about = "Train a convolutional text classifier over frozen word embeddings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Evaluate(args) => run_evaluate(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    let backend  = args.backend;
    let use_case = TrainUseCase::new(args.into());
    tracing::info!(
        "Training on '{}' (backend: {:?}); artifacts go to '{}'",
        use_case.config().train_dir,
        backend,
        use_case.config().model_dir,
    );

    let epochs = match backend {
        BackendKind::Wgpu    => use_case.execute::<GpuTrainBackend>(Default::default())?.history.len(),
        BackendKind::Ndarray => use_case.execute::<CpuTrainBackend>(Default::default())?.history.len(),
    };

    tracing::info!("Finished {} epoch(s)", epochs);
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let use_case = EvaluateUseCase::new(args.model_dir, args.test);
    let report = match args.backend {
        BackendKind::Wgpu    => use_case.execute::<GpuBackend>(Default::default())?,
        BackendKind::Ndarray => use_case.execute::<CpuBackend>(Default::default())?,
    };

    tracing::info!("{}", serde_json::to_string(&report)?);
    Ok(())
}
