// ============================================================
// Layer 6 - Checkpoint Manager
// ============================================================
// Everything written to the model directory:
//
//   model.pt                 ← record of a freshly constructed
//                              (untrained) network; see
//                              `save_architecture`
//   model-trained.mpk.gz     ← trained weights (gzipped half-precision
//                              MessagePack record)
//   model_config.json        ← TextCnnConfig used to rebuild the net
//   train_config.json        ← hyperparameters and directories
//
// The trained network can only be rebuilt when the config is
// loaded first: the record has to be loaded into a model with
// exactly the same architecture.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use burn::{
    prelude::*,
    record::{
        BinBytesRecorder, FullPrecisionSettings, HalfPrecisionSettings,
        NamedMpkGzFileRecorder, Recorder,
    },
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{TextCnn, TextCnnConfig};

pub const ARCHITECTURE_FILE: &str = "model.pt";
pub const TRAINED_MODEL_STEM: &str = "model-trained";
/// Extension `TrainedRecorder` appends to `TRAINED_MODEL_STEM`.
pub const TRAINED_MODEL_EXT: &str = "mpk.gz";
pub const MODEL_CONFIG_FILE: &str = "model_config.json";
pub const TRAIN_CONFIG_FILE: &str = "train_config.json";

type TrainedRecorder = NamedMpkGzFileRecorder<HalfPrecisionSettings>;

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Points at `dir`, creating it if it does not exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Write `model.pt`.
    ///
    /// The file holds a network built fresh from `config`, NOT the trained
    /// one: this is what the job has always exported, and downstream
    /// consumers of `model.pt` rely on it only for the architecture.
    /// Trained weights go through `save_trained`.
    pub fn save_architecture<B: Backend>(
        &self,
        config: &TextCnnConfig,
        device: &B::Device,
    ) -> Result<PathBuf> {
        let fresh: TextCnn<B> = config.init(device)?;
        let bytes = BinBytesRecorder::<FullPrecisionSettings>::default()
            .record(fresh.into_record(), ())
            .context("Failed to serialise network architecture")?;

        let path = self.dir.join(ARCHITECTURE_FILE);
        fs::write(&path, bytes)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;

        tracing::warn!(
            "'{}' holds an untrained network; trained weights are in '{}.{}'",
            path.display(),
            TRAINED_MODEL_STEM,
            TRAINED_MODEL_EXT,
        );
        Ok(path)
    }

    /// Save trained weights plus the config needed to rebuild the network.
    pub fn save_trained<B: Backend>(
        &self,
        model:  &TextCnn<B>,
        config: &TextCnnConfig,
    ) -> Result<()> {
        let path = self.dir.join(TRAINED_MODEL_STEM);
        TrainedRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        let cfg_path = self.dir.join(MODEL_CONFIG_FILE);
        config
            .save(&cfg_path)
            .with_context(|| format!("Cannot write '{}'", cfg_path.display()))?;

        tracing::info!("Saved trained model to '{}'", self.dir.display());
        Ok(())
    }

    /// Rebuild the trained network from `model_config.json` and the
    /// gzipped checkpoint.
    pub fn load_trained<B: Backend>(
        &self,
        device: &B::Device,
    ) -> Result<(TextCnnConfig, TextCnn<B>)> {
        let cfg_path = self.dir.join(MODEL_CONFIG_FILE);
        let config = TextCnnConfig::load(&cfg_path).with_context(|| {
            format!(
                "Cannot read '{}'. Has a training run written to this directory?",
                cfg_path.display()
            )
        })?;

        let path   = self.dir.join(TRAINED_MODEL_STEM);
        let record = TrainedRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load checkpoint '{}'", path.display()))?;

        let model = config.init::<B>(device)?.load_record(record);
        tracing::info!("Loaded trained model from '{}'", self.dir.display());
        Ok((config, model))
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join(TRAIN_CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }
}
