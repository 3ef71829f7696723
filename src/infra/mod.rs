// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns used by several layers:
//
//   checkpoint.rs      — single-slot model checkpoint: weights,
//                        architecture config, and the label space
//                        the head was trained on
//
//   tokenizer_store.rs — tokenizer persistence: loads a pretrained
//                        vocabulary or builds one from the dataset,
//                        so training and inference always agree
//
//   metrics.rs         — per-epoch training metrics CSV
//
// Reference: Rust Book §7 (Modules), Burn Book §5 (Checkpointing)

/// Model checkpoint saving, loading, and staleness detection
pub mod checkpoint;

/// Tokenizer persistence
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
