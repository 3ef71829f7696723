// ============================================================
// Layer 5 — ML Layer (Burn)
// ============================================================
// The model, training and inference code lives here; outside
// this layer burn only appears at the seams that must touch it
// (tensor batching in data/, the recorder in infra/checkpoint).
//
//   model.rs      — transformer encoder + classification head:
//                   token and positional embeddings, multi-head
//                   self-attention with padding mask, GELU FFN,
//                   layer norm, [CLS] pooling
//
//   trainer.rs    — fine-tuning loop: forward with labels,
//                   cross-entropy, backward, AdamW step,
//                   held-out scoring, end-of-run checkpoint
//
//   predictor.rs  — checkpoint-backed inference: softmax over
//                   the logits, argmax, label-space mapping
//
//   similarity.rs — normalized edit-distance meaning lookup
//                   (no tensors; kept next to the predictor it
//                   is always invoked with)
//
// Reference: Vaswani et al. (2017) Attention Is All You Need
//            Devlin et al. (2019) BERT

/// Transformer encoder classification model
pub mod model;

/// Fine-tuning loop with held-out scoring and checkpointing
pub mod trainer;

/// Inference over the trained checkpoint
pub mod predictor;

/// Edit-distance similarity and nearest-meaning lookup
pub mod similarity;
