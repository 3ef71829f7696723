// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Guarantees that training and inference share one vocabulary.
//
// A pretrained `tokenizer.json` (e.g. a cased Turkish BERT
// vocabulary dropped into the checkpoint directory) is loaded
// when present. Otherwise a case-sensitive word-level vocabulary
// is built from the dataset texts and written in the HuggingFace
// tokenizer JSON format, which is what Tokenizer::from_file()
// expects — building the JSON directly sidesteps the
// train_from_files ModelWrapper type mismatch in tokenizers 0.15.

use anyhow::Context;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::domain::error::{Error, Result};

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: PathBuf::from(dir.into()) }
    }

    /// Load the existing tokenizer or build a new one from texts.
    pub fn load_or_build(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        let tok_path = self.dir.join("tokenizer.json");
        if tok_path.exists() {
            tracing::info!("Loading existing tokenizer from disk");
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    /// Load a previously saved tokenizer from its JSON file.
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join("tokenizer.json");
        Tokenizer::from_file(&path)
            .map_err(|e| Error::model(format!("cannot load tokenizer from '{}': {e}", path.display())))
    }

    /// Build a cased word-level vocabulary from the dataset texts and
    /// write a valid tokenizer JSON. Case is preserved: the category
    /// model is trained on cased text, so the vocabulary must be too.
    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        std::fs::create_dir_all(&self.dir)?;

        // ── Step 1: word frequencies over the corpus ──────────────────────────
        use std::collections::HashMap;
        let mut freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for word in text.split_whitespace() {
                let w = word.trim_matches(|c: char| !c.is_alphanumeric());
                if !w.is_empty() {
                    *freq.entry(w.to_string()).or_insert(0) += 1;
                }
            }
        }

        // Sort by frequency descending. Special tokens occupy ids
        // below 104, so at most vocab_size - 104 words fit: no word
        // may be assigned an id outside the model's embedding table.
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(vocab_size.saturating_sub(104));

        // ── Step 2: vocab JSON with BERT-convention special ids ───────────────
        let mut vocab = serde_json::json!({
            "[PAD]":  0,
            "[UNK]":  1,
            "[CLS]":  101,
            "[SEP]":  102,
            "[MASK]": 103,
        });

        let mut next_id = 104usize;
        for (word, _) in &words {
            if vocab.get(word).is_none() {
                vocab[word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // ── Step 3: full tokenizer JSON in HuggingFace format ─────────────────
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0,   "content": "[PAD]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1,   "content": "[UNK]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 101, "content": "[CLS]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 102, "content": "[SEP]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 103, "content": "[MASK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": false
            },
            "pre_tokenizer": {
                "type": "Whitespace"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let tok_path = self.dir.join("tokenizer.json");
        std::fs::write(&tok_path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| "Cannot write tokenizer JSON")
            .map_err(Error::model)?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            next_id,
            tok_path.display()
        );

        // Load back as a proper Tokenizer instance
        Tokenizer::from_file(&tok_path)
            .map_err(|e| Error::model(format!("cannot reload tokenizer: {e}")))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let texts = vec!["Damlaya damlaya göl olur".to_string(), "Az tavuk gür öter".to_string()];

        let built  = store.load_or_build(&texts, 500).unwrap();
        let loaded = store.load_or_build(&texts, 500).unwrap();

        let a = built.encode("Damlaya damlaya göl olur", false).unwrap();
        let b = loaded.encode("Damlaya damlaya göl olur", false).unwrap();
        assert_eq!(a.get_ids(), b.get_ids());
        assert!(!a.get_ids().is_empty());
    }

    #[test]
    fn test_vocabulary_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let texts = vec!["Damlaya damlaya".to_string()];
        let tok = store.load_or_build(&texts, 500).unwrap();

        // "Damlaya" is in vocab, "damlaya" is too, and they differ
        let upper = tok.encode("Damlaya", false).unwrap();
        let lower = tok.encode("damlaya", false).unwrap();
        assert_ne!(upper.get_ids(), lower.get_ids());
    }

    #[test]
    fn test_word_ids_stay_inside_the_embedding_table() {
        let dir = tempdir().unwrap();
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let texts: Vec<String> = (0..300).map(|i| format!("kelime{i}")).collect();
        let tok = store.load_or_build(&texts, 150).unwrap();

        let enc = tok.encode(texts.join(" ").as_str(), false).unwrap();
        assert!(enc.get_ids().iter().all(|&id| (id as usize) < 150));
    }
}
