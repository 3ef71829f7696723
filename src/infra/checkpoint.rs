// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// The checkpoint directory holds one slot, overwritten on every
// successful training run:
//
//   checkpoints/
//     model.mpk.gz       ← trained weights (MessagePack + gzip)
//     train_config.json  ← architecture hyperparameters
//     label_space.json   ← the Category Set the head was trained on
//     tokenizer.json     ← shared vocabulary (TokenizerStore)
//
// The config is saved separately because inference must rebuild
// the exact architecture before weights can be loaded into it.
//
// The label space is saved so a stale checkpoint is detectable:
// the classification head's output dimension equals the category
// count at training time, and loading it after the dataset's
// Category Set has changed would silently relabel predictions.
// `verify_label_space` turns that silent mismatch into a Model
// error the application handles by retraining.
//
// Weights are recorded under a scratch name and renamed into
// place, so a crash mid-write can never corrupt the live slot.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::domain::error::{Error, Result};
use crate::ml::model::ProverbClassifier;

const WEIGHTS_STEM:     &str = "model";
const WEIGHTS_SCRATCH:  &str = "model_next";
const WEIGHTS_FILE:     &str = "model.mpk.gz";
const SCRATCH_FILE:     &str = "model_next.mpk.gz";
const CONFIG_FILE:      &str = "train_config.json";
const LABEL_SPACE_FILE: &str = "label_space.json";

/// Manages the single checkpoint slot in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new manager, creating the directory if needed.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Whether a trained checkpoint exists on disk.
    pub fn has_checkpoint(&self) -> bool {
        self.dir.join(WEIGHTS_FILE).exists()
    }

    /// Save trained weights, replacing the previous checkpoint.
    ///
    /// The recorder writes `model_next.mpk.gz`; only once that write
    /// has fully succeeded is it renamed over `model.mpk.gz`.
    pub fn save_model<B: AutodiffBackend>(&self, model: &ProverbClassifier<B>) -> Result<()> {
        let scratch = self.dir.join(WEIGHTS_SCRATCH);

        CompactRecorder::new()
            .record(model.clone().into_record(), scratch)
            .map_err(|e| Error::model(format!("failed to save checkpoint: {e}")))?;

        fs::rename(self.dir.join(SCRATCH_FILE), self.dir.join(WEIGHTS_FILE))?;
        tracing::debug!("Checkpoint saved to '{}'", self.dir.join(WEIGHTS_FILE).display());
        Ok(())
    }

    /// Load the checkpoint weights into a freshly built model.
    ///
    /// The model must already have the architecture (and head size)
    /// the checkpoint was trained with, or loading fails.
    pub fn load_model<B: Backend>(
        &self,
        model:  ProverbClassifier<B>,
        device: &B::Device,
    ) -> Result<ProverbClassifier<B>> {
        let path = self.dir.join(WEIGHTS_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .map_err(|e| {
                Error::model(format!(
                    "cannot load checkpoint '{}': {e}. Has the model been trained?",
                    path.display()
                ))
            })?;

        Ok(model.load_record(record))
    }

    /// Persist the training configuration so inference can rebuild
    /// the exact model architecture.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(self.dir.join(CONFIG_FILE), json)?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Persist the Category Set the classification head was trained on.
    pub fn save_label_space(&self, categories: &[String]) -> Result<()> {
        let json = serde_json::to_string_pretty(categories)?;
        fs::write(self.dir.join(LABEL_SPACE_FILE), json)?;
        Ok(())
    }

    pub fn load_label_space(&self) -> Result<Vec<String>> {
        let path = self.dir.join(LABEL_SPACE_FILE);
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Reject the checkpoint when its stored Category Set disagrees
    /// with the dataset's current one. Returns the stored set on
    /// success so the caller can size the head from it.
    pub fn verify_label_space(&self, current: &[String]) -> Result<Vec<String>> {
        let stored = self.load_label_space()?;
        if stored != current {
            return Err(Error::model(format!(
                "label space mismatch: checkpoint was trained on {} categories {:?} \
                 but the dataset now has {} categories {:?}; retrain before predicting",
                stored.len(),
                stored,
                current.len(),
                current,
            )));
        }
        Ok(stored)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_label_space_round_trip() {
        let dir = tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().to_str().unwrap());
        let cats = vec!["dostluk".to_string(), "emek".to_string()];

        ckpt.save_label_space(&cats).unwrap();
        assert_eq!(ckpt.load_label_space().unwrap(), cats);
        assert_eq!(ckpt.verify_label_space(&cats).unwrap(), cats);
    }

    #[test]
    fn test_label_space_mismatch_is_rejected() {
        let dir = tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().to_str().unwrap());
        ckpt.save_label_space(&["emek".to_string()]).unwrap();

        let grown = vec!["dostluk".to_string(), "emek".to_string()];
        assert!(matches!(ckpt.verify_label_space(&grown), Err(Error::Model(_))));
    }

    #[test]
    fn test_missing_label_space_is_an_io_error() {
        let dir = tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().to_str().unwrap());
        assert!(matches!(ckpt.load_label_space(), Err(Error::Io(_))));
    }

    #[test]
    fn test_has_checkpoint_false_on_fresh_dir() {
        let dir = tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path().to_str().unwrap());
        assert!(!ckpt.has_checkpoint());
    }
}
