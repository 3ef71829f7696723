// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the dataset file on disk and the tensor
// batches the training loop consumes:
//
//   atasozleri.json
//       │
//       ▼
//   DatasetStore      → reads/rewrites the record collection
//       │
//       ▼
//   TextEncoder       → fixed-length token ids + attention mask
//       │
//       ▼
//   ProverbDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   ProverbBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads and atomically rewrites the JSON dataset file
pub mod store;

/// Fixed-length encoding of raw text via the shared tokenizer
pub mod encoder;

/// Implements Burn's Dataset trait for encoded proverbs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded shuffle and train/test split
pub mod splitter;
