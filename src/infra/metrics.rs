// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// Records per-epoch metrics to `metrics.csv` in the output-data
// directory so a run can be inspected after the job finishes.
//
// Metrics recorded per epoch:
//   - epoch:           the epoch number (1, 2, 3, ...)
//   - last_train_loss: BCE of the final training batch
//   - train_loss:      mean BCE over all training batches
//   - val_loss:        summed BCE / samples on the test split
//   - val_acc:         arg-max accuracy on the test split
//
// Example CSV output:
//   epoch,last_train_loss,train_loss,val_loss,val_acc
//   1,0.512300,0.548100,2.101200,0.410000

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

pub const METRICS_FILE: &str = "metrics.csv";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: usize,

    /// Loss of the last optimiser step in the epoch; what the
    /// `train_loss:` console line reports
    pub last_train_loss: f64,

    /// Average mean-BCE over all training batches
    pub train_loss: f64,

    pub val_loss: f64,

    /// Range: [0.0, 1.0]
    pub val_acc: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch:           usize,
        last_train_loss: f64,
        train_loss:      f64,
        val_loss:        f64,
        val_acc:         f64,
    ) -> Self {
        Self { epoch, last_train_loss, train_loss, val_loss, val_acc }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Appends epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory if needed and write the CSV header
    /// when the file does not exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;

        let csv_path = dir.join(METRICS_FILE);

        // Appending across runs keeps earlier rows
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "epoch,last_train_loss,train_loss,val_loss,val_acc")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.last_train_loss,
            m.train_loss,
            m.val_loss,
            m.val_acc,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
