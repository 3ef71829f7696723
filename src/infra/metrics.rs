// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch, so a
// learning curve can be plotted from any run.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: mean per-batch cross-entropy on the training set
//   - test_loss:  mean per-batch cross-entropy on the held-out set
//   - test_acc:   fraction of held-out labels predicted exactly
//
// Output file: checkpoints/metrics.csv, appended across runs.

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

/// One row of metrics for a single training epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch:      usize,
    pub train_loss: f64,
    pub test_loss:  f64,
    pub test_acc:   f64,
}

/// Appends epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new logger, writing the CSV header if the file is new.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,test_loss,test_acc")?;
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new CSV row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.test_loss, m.test_acc,
        )?;
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_header_written_once_and_rows_appended() {
        let dir = tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().to_str().unwrap()).unwrap();

        logger.log(&EpochMetrics { epoch: 1, train_loss: 1.5, test_loss: 1.6, test_acc: 0.25 }).unwrap();
        // Re-opening must not duplicate the header
        let logger = MetricsLogger::new(dir.path().to_str().unwrap()).unwrap();
        logger.log(&EpochMetrics { epoch: 2, train_loss: 1.1, test_loss: 1.2, test_acc: 0.5 }).unwrap();

        let contents = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "epoch,train_loss,test_loss,test_acc");
        assert!(lines[1].starts_with("1,1.5"));
        assert!(lines[2].starts_with("2,1.1"));
    }
}
