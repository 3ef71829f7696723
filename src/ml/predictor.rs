// ============================================================
// Layer 5 — Predictor
// ============================================================
// Loads the trained checkpoint and classifies input text.
//
// Inference runs on the plain (non-autodiff) backend, so no
// gradients are ever tracked, and the model is rebuilt with
// dropout 0 from the persisted architecture config.
//
// Construction verifies the checkpoint's stored label space
// against the dataset's current Category Set: a checkpoint
// trained on a different set would silently map argmax indices
// to the wrong category strings, so it is rejected instead.

use burn::prelude::*;

use crate::data::encoder::TextEncoder;
use crate::domain::error::{Error, Result};
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{ProverbClassifier, ProverbClassifierConfig};

type InferBackend = burn::backend::Wgpu;

pub struct Predictor {
    model:      ProverbClassifier<InferBackend>,
    encoder:    TextEncoder,
    categories: Vec<String>,
    device:     burn::backend::wgpu::WgpuDevice,
}

impl Predictor {
    /// Rebuild the trained model from the checkpoint directory.
    ///
    /// `current_categories` is the dataset's Category Set at call
    /// time; it must equal the stored label space or the load is
    /// rejected with a `Model` error (the caller retrains).
    pub fn from_checkpoint(
        ckpt_manager:       &CheckpointManager,
        encoder:            TextEncoder,
        current_categories: &[String],
    ) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let cfg    = ckpt_manager.load_config()?;
        let categories = ckpt_manager.verify_label_space(current_categories)?;

        let model_cfg = ProverbClassifierConfig::new(
            cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
            cfg.num_heads, cfg.num_layers, cfg.d_ff,
            categories.len(), 0.0,
        );
        let model: ProverbClassifier<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint ({} categories)", categories.len());

        Ok(Self { model, encoder, categories, device })
    }

    /// Classify one text into a category of the trained label space.
    ///
    /// Deterministic for fixed weights and a fixed Category Set:
    /// encode, forward, softmax, argmax, map back to the string.
    pub fn predict_category(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            return Err(Error::validation("cannot classify empty text"));
        }

        let encoded = self.encoder.encode(text)?;

        let ids:  Vec<i32> = encoded.input_ids.iter().map(|&x| x as i32).collect();
        let mask: Vec<i32> = encoded.attention_mask.iter().map(|&x| x as i32).collect();
        let seq_len = ids.len();

        let input_ids = Tensor::<InferBackend, 1, Int>::from_ints(ids.as_slice(), &self.device)
            .reshape([1, seq_len]);
        let attention_mask = Tensor::<InferBackend, 1, Int>::from_ints(mask.as_slice(), &self.device)
            .reshape([1, seq_len]);

        let logits = self.model.forward(input_ids, attention_mask);
        let probs  = burn::tensor::activation::softmax(logits, 1);

        let index = probs
            .argmax(1)
            .flatten::<1>(0, 1)
            .into_scalar()
            .elem::<i64>() as usize;

        self.categories
            .get(index)
            .cloned()
            .ok_or_else(|| {
                Error::model(format!(
                    "predicted index {index} outside the {}-category label space",
                    self.categories.len()
                ))
            })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}
