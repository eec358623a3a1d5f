// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the `train` and `evaluate` subcommands and their flags.
//
// Directory flags fall back to the SM_* environment variables
// a managed training container exports, so the binary can be
// launched by the platform with only hyperparameters on the
// command line. Hyperparameter flags also accept the snake_case
// spelling the platform passes (`--learning_rate 0.01`).
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the text CNN on pre-tokenised .npy splits
    Train(TrainArgs),

    /// Score a trained checkpoint against a test split
    Evaluate(EvaluateArgs),
}

/// Which Burn backend runs the tensors
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// wgpu (Vulkan / Metal / DX12)
    #[default]
    Wgpu,
    /// Pure-Rust CPU backend
    Ndarray,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Number of full passes through the training data
    #[arg(long, default_value_t = 1)]
    pub epochs: usize,

    /// RMSProp learning rate
    #[arg(long, alias = "learning_rate", default_value_t = 0.001)]
    pub learning_rate: f64,

    /// Width of the one-hot label rows
    #[arg(long, alias = "num_classes", default_value_t = 4)]
    pub num_classes: usize,

    /// Expected number of rows in the embedding matrix.
    /// The matrix itself wins when the two disagree.
    #[arg(long, alias = "vocab_size", default_value_t = 400_000)]
    pub vocab_size: usize,

    #[arg(long, alias = "batch_size", default_value_t = 16)]
    pub batch_size: usize,

    /// Seeds weight init and the shuffle order
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, value_enum, default_value_t = BackendKind::Wgpu)]
    pub backend: BackendKind,

    /// Where metrics.csv is written
    #[arg(long, alias = "output_data_dir", env = "SM_OUTPUT_DATA_DIR", default_value = "output")]
    pub output_data_dir: String,

    /// Where model.pt and the trained checkpoint are written
    #[arg(long, alias = "model_dir", env = "SM_MODEL_DIR", default_value = "model")]
    pub model_dir: String,

    /// Directory holding train_X.npy / train_Y.npy
    #[arg(long, env = "SM_CHANNEL_TRAIN", default_value = "data/train")]
    pub train: String,

    /// Directory holding test_X.npy / test_Y.npy
    #[arg(long, env = "SM_CHANNEL_TEST", default_value = "data/test")]
    pub test: String,

    /// Directory holding docs-embedding-matrix.npy
    #[arg(long, env = "SM_CHANNEL_EMBEDDINGS", default_value = "data/embeddings")]
    pub embeddings: String,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            epochs:          a.epochs,
            learning_rate:   a.learning_rate,
            num_classes:     a.num_classes,
            vocab_size:      a.vocab_size,
            batch_size:      a.batch_size,
            seed:            a.seed,
            output_data_dir: a.output_data_dir,
            model_dir:       a.model_dir,
            train_dir:       a.train,
            test_dir:        a.test,
            embeddings_dir:  a.embeddings,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory a training run wrote its checkpoint to
    #[arg(long, alias = "model_dir", env = "SM_MODEL_DIR", default_value = "model")]
    pub model_dir: String,

    /// Directory holding test_X.npy / test_Y.npy
    #[arg(long, env = "SM_CHANNEL_TEST", default_value = "data/test")]
    pub test: String,

    #[arg(long, value_enum, default_value_t = BackendKind::Wgpu)]
    pub backend: BackendKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn train_args(argv: &[&str]) -> TrainArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Train(a) => a,
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_hyperparameter_defaults() {
        let a = train_args(&["text-cnn-trainer", "train"]);
        assert_eq!(a.epochs, 1);
        assert_eq!(a.learning_rate, 0.001);
        assert_eq!(a.num_classes, 4);
        assert_eq!(a.vocab_size, 400_000);
        assert_eq!(a.batch_size, 16);
        assert_eq!(a.backend, BackendKind::Wgpu);
    }

    #[test]
    fn test_snake_case_aliases_are_accepted() {
        let a = train_args(&[
            "text-cnn-trainer", "train",
            "--learning_rate", "0.01",
            "--num_classes", "3",
            "--vocab_size", "50",
            "--epochs", "2",
            "--backend", "ndarray",
        ]);
        assert_eq!(a.learning_rate, 0.01);
        assert_eq!(a.num_classes, 3);
        assert_eq!(a.vocab_size, 50);
        assert_eq!(a.epochs, 2);
        assert_eq!(a.backend, BackendKind::Ndarray);
    }

    #[test]
    fn test_args_map_onto_train_config() {
        let cfg: TrainConfig = train_args(&[
            "text-cnn-trainer", "train",
            "--train", "/in/train",
            "--test", "/in/test",
            "--embeddings", "/in/emb",
            "--model-dir", "/out/model",
            "--output-data-dir", "/out/data",
        ])
        .into();
        assert_eq!(cfg.train_dir, "/in/train");
        assert_eq!(cfg.test_dir, "/in/test");
        assert_eq!(cfg.embeddings_dir, "/in/emb");
        assert_eq!(cfg.model_dir, "/out/model");
        assert_eq!(cfg.output_data_dir, "/out/data");
    }

    #[test]
    fn test_non_numeric_epochs_is_rejected() {
        assert!(Cli::try_parse_from(["text-cnn-trainer", "train", "--epochs", "many"]).is_err());
    }
}
