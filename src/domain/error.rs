// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every fallible core operation returns one of these four
// variants so the presentation layer can tell a bad user input
// apart from a broken file without string matching:
//
//   Io         — dataset or checkpoint file missing/unreadable/unwritable
//   Parse      — dataset file exists but is malformed JSON
//   Model      — checkpoint/label-space mismatch, tokenizer or
//                tensor failure, training aborted
//   Validation — empty input text, missing field on record add,
//                nothing to train on
//
// There is no retry policy anywhere: errors surface to the caller.
//
// Reference: Rust Book §9 (Error Handling)

use thiserror::Error;

/// Result alias used throughout the core layers.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// File missing, unreadable, or unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset (or a sidecar JSON file) is present but malformed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tokenizer, tensor, or checkpoint-consistency failure.
    #[error("model error: {0}")]
    Model(String),

    /// The caller supplied unusable input.
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Shorthand for a `Model` error from any displayable cause.
    pub fn model(msg: impl std::fmt::Display) -> Self {
        Error::Model(msg.to_string())
    }

    /// Shorthand for a `Validation` error from any displayable cause.
    pub fn validation(msg: impl std::fmt::Display) -> Self {
        Error::Validation(msg.to_string())
    }
}
