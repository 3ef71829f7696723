// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full fine-tuning pass over the encoded dataset using Burn's
// DataLoader and AdamW.
//
// Backend split:
//   - Training uses TrainBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() returns the model on InnerBackend (Wgpu)
//   - The test batcher must also use InnerBackend
//   - argmax(1) returns [batch,1] so we flatten before .equal()
//
// The held-out test partition is scored every epoch (loss and
// exact-label accuracy) as a quality signal; it never gates the
// checkpoint write. The checkpoint (weights + label space) is
// written once, after the final epoch — an aborted run persists
// nothing.
//
// Reference: Burn Book §5, Loshchilov & Hutter (2019) AdamW

use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamWConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::ProverbBatcher, dataset::ProverbDataset};
use crate::domain::error::Result;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{ProverbClassifier, ProverbClassifierConfig};

type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;
type InnerBackend = burn::backend::Wgpu;

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: ProverbDataset,
    test_dataset:  ProverbDataset,
    categories:    &[String],
    ckpt_manager:  &CheckpointManager,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);
    train_loop(cfg, train_dataset, test_dataset, categories, ckpt_manager, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: ProverbDataset,
    test_dataset:  ProverbDataset,
    categories:    &[String],
    ckpt_manager:  &CheckpointManager,
    device:        burn::backend::wgpu::WgpuDevice,
) -> Result<()> {

    // ── Build model sized to the current Category Set ─────────────────────────
    let model_cfg = ProverbClassifierConfig::new(
        cfg.vocab_size, cfg.max_seq_len, cfg.d_model,
        cfg.num_heads, cfg.num_layers, cfg.d_ff,
        categories.len(), cfg.dropout,
    );
    let mut model: ProverbClassifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} layers, d_model={}, {} categories",
        cfg.num_layers, cfg.d_model, categories.len(),
    );

    // ── AdamW optimiser ───────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update, with decoupled weight decay)
    let optim_cfg = AdamWConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = ProverbBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Test data loader (InnerBackend — no autodiff overhead) ────────────────
    let test_batcher = ProverbBatcher::<InnerBackend>::new(device.clone());
    let test_loader  = DataLoaderBuilder::new(test_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(test_dataset);

    let metrics = MetricsLogger::new(
        ckpt_manager.dir().to_string_lossy().into_owned(),
    )?;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for batch in train_loader.iter() {
            let (loss, _) = model.forward_loss(
                batch.input_ids,
                batch.attention_mask,
                batch.labels,
            );

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + AdamW update, then the gradients are dropped
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Test phase ────────────────────────────────────────────────────────
        // model.valid() → ProverbClassifier<InnerBackend>, dropout disabled
        let model_valid = model.valid();

        let mut test_loss_sum = 0.0f64;
        let mut test_batches  = 0usize;
        let mut correct       = 0usize;
        let mut total_samples = 0usize;

        for batch in test_loader.iter() {
            let logits = model_valid.forward(batch.input_ids, batch.attention_mask);

            let ce = burn::nn::loss::CrossEntropyLossConfig::new()
                .init(&logits.device());
            let batch_loss: f64 = ce
                .forward(logits.clone(), batch.labels.clone())
                .into_scalar().elem::<f64>();
            test_loss_sum += batch_loss;
            test_batches  += 1;

            // argmax(1) returns shape [batch, 1] — flatten to [batch]
            // before comparing with labels which is [batch]
            let predicted = logits.argmax(1).flatten::<1>(0, 1);

            total_samples += batch.labels.dims()[0];
            let batch_correct: i64 = predicted
                .equal(batch.labels)
                .int().sum().into_scalar().elem::<i64>();
            correct += batch_correct as usize;
        }

        let avg_test_loss = if test_batches  > 0 { test_loss_sum / test_batches as f64 } else { f64::NAN };
        let test_acc      = if total_samples > 0 { correct as f64 / total_samples as f64 } else { 0.0 };

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_loss={:.4} | test_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, avg_test_loss, test_acc * 100.0,
        );

        metrics.log(&EpochMetrics {
            epoch,
            train_loss: avg_train_loss,
            test_loss:  avg_test_loss,
            test_acc,
        })?;
    }

    // ── Persist the finished run: weights first, then the label space
    // they were trained on ────────────────────────────────────────────────────
    ckpt_manager.save_model(&model)?;
    ckpt_manager.save_label_space(categories)?;
    tracing::info!("Training complete, checkpoint saved");
    Ok(())
}
