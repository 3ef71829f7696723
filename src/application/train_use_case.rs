// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full fine-tuning pipeline in order:
//
//   Step 1: Load the dataset            (Layer 4 - data)
//   Step 2: Filter trainable records    (Layer 3 - domain)
//   Step 3: Derive the Category Set     (Layer 3 - domain)
//   Step 4: Build / load tokenizer      (Layer 6 - infra)
//   Step 5: Encode labelled samples     (Layer 4 - data)
//   Step 6: Seeded train/test split     (Layer 4 - data)
//   Step 7: Build Burn datasets         (Layer 4 - data)
//   Step 8: Save config                 (Layer 6 - infra)
//   Step 9: Run training loop           (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{ProverbDataset, ProverbSample},
    encoder::TextEncoder,
    splitter::split_train_test,
    store::DatasetStore,
};
use crate::domain::error::{Error, Result};
use crate::domain::record::category_set;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so the
// checkpoint manager can persist it and inference can rebuild the
// exact architecture later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub dataset_path:   String,
    pub checkpoint_dir: String,
    pub max_seq_len:    usize,
    pub batch_size:     usize,
    pub epochs:         usize,
    pub lr:             f64,
    pub train_fraction: f64,
    pub seed:           u64,
    pub d_model:        usize,
    pub num_heads:      usize,
    pub num_layers:     usize,
    pub d_ff:           usize,
    pub dropout:        f64,
    pub vocab_size:     usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            dataset_path:   "data/atasozleri.json".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            max_seq_len:    128,
            batch_size:     8,
            epochs:         5,
            lr:             2e-5,
            train_fraction: 0.8,
            seed:           42,
            d_model:        256,
            num_heads:      8,
            num_layers:     4,
            d_ff:           1024,
            dropout:        0.1,
            vocab_size:     32000,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load all records ──────────────────────────────────────────
        let store   = DatasetStore::new(&cfg.dataset_path);
        let records = store.load()?;
        tracing::info!("Loaded {} records from '{}'", records.len(), cfg.dataset_path);

        // ── Step 2: Keep only records with both text and category ─────────────
        let trainable: Vec<_> = records.iter().filter(|r| r.is_trainable()).collect();
        if trainable.is_empty() {
            return Err(Error::validation(
                "no trainable records: every record is missing its text or category",
            ));
        }

        // ── Step 3: Category Set and label-index mapping ──────────────────────
        // Sorted fresh from the current records; index i = i-th category.
        let categories = category_set(&records);
        tracing::info!("Category set: {:?}", categories);

        // ── Step 4: Build / load the shared tokenizer ─────────────────────────
        let texts: Vec<String> = trainable.iter().map(|r| r.text.clone()).collect();
        let tok_store = TokenizerStore::new(&cfg.checkpoint_dir);
        let tokenizer = tok_store.load_or_build(&texts, cfg.vocab_size)?;
        let encoder   = TextEncoder::new(tokenizer, cfg.max_seq_len);

        // ── Step 5: Encode every trainable record ─────────────────────────────
        // Any encoding failure aborts the run; nothing is persisted.
        let mut samples = Vec::with_capacity(trainable.len());
        for record in &trainable {
            let category = record.category.as_deref().unwrap_or_default();
            let label = categories
                .binary_search_by(|c| c.as_str().cmp(category))
                .map_err(|_| {
                    Error::validation(format!("category '{category}' missing from category set"))
                })?;

            let encoded = encoder.encode(&record.text)?;
            samples.push(ProverbSample {
                input_ids:      encoded.input_ids,
                attention_mask: encoded.attention_mask,
                label,
            });
        }
        tracing::info!("Encoded {} training samples", samples.len());

        // ── Step 6: Seeded 80/20 split ────────────────────────────────────────
        // Fixed seed: repeated runs over the same data partition identically.
        let (train_samples, test_samples) =
            split_train_test(samples, cfg.train_fraction, cfg.seed);
        tracing::info!(
            "Split: {} train, {} test",
            train_samples.len(),
            test_samples.len()
        );

        // ── Step 7: Build Burn datasets ───────────────────────────────────────
        let train_dataset = ProverbDataset::new(train_samples);
        let test_dataset  = ProverbDataset::new(test_samples);

        // ── Step 8: Save config for inference ─────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 9: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, train_dataset, test_dataset, &categories, &ckpt_manager)?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_zero_qualifying_records_fails_fast() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("atasozleri.json");
        // Every record is missing either its text or its category
        std::fs::write(
            &path,
            r#"{"atasozleri":[{"metin":"Az tavuk gür öter"},{"kategori":"emek","anlam":"x"}]}"#,
        )
        .unwrap();

        let cfg = TrainConfig {
            dataset_path:   path.to_string_lossy().into_owned(),
            checkpoint_dir: dir.path().join("ckpt").to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };

        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_missing_dataset_is_an_io_error() {
        let dir = tempdir().unwrap();
        let cfg = TrainConfig {
            dataset_path:   dir.path().join("nope.json").to_string_lossy().into_owned(),
            checkpoint_dir: dir.path().join("ckpt").to_string_lossy().into_owned(),
            ..TrainConfig::default()
        };
        assert!(matches!(TrainUseCase::new(cfg).execute(), Err(Error::Io(_))));
    }
}
