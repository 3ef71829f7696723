// ============================================================
// Layer 4 — Text Encoder
// ============================================================
// Turns raw proverb text into the fixed-length numeric form the
// model consumes: [CLS] tokens [SEP] then padding, plus a mask
// marking which positions are real.
//
// Deterministic and stateless: the same text and max length
// always yield identical output. The vocabulary comes from the
// TokenizerStore (Layer 6) and is shared between training and
// inference.

use tokenizers::Tokenizer;

use crate::domain::error::{Error, Result};

// Special token ids, BERT convention — must agree with the ids the
// TokenizerStore writes into tokenizer.json.
pub const PAD_ID: u32 = 0;
pub const CLS_ID: u32 = 101;
pub const SEP_ID: u32 = 102;

/// One encoded text, padded/truncated to a fixed length.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedText {
    /// Token ids, always exactly `max_len` long.
    pub input_ids: Vec<u32>,
    /// 1 = real token, 0 = padding. Same length as `input_ids`.
    pub attention_mask: Vec<u32>,
}

/// Wraps the subword tokenizer with the fixed-length framing.
pub struct TextEncoder {
    tokenizer: Tokenizer,
    max_len:   usize,
}

impl TextEncoder {
    pub fn new(tokenizer: Tokenizer, max_len: usize) -> Self {
        Self { tokenizer, max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Encode one text: [CLS] tokens [SEP], truncated to `max_len`
    /// (the [SEP] survives truncation), padded with [PAD].
    pub fn encode(&self, text: &str) -> Result<EncodedText> {
        let enc = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| Error::model(format!("tokenise '{text}': {e}")))?;

        let mut input_ids: Vec<u32> = Vec::with_capacity(self.max_len);
        input_ids.push(CLS_ID);
        input_ids.extend_from_slice(enc.get_ids());
        input_ids.truncate(self.max_len - 1);
        input_ids.push(SEP_ID);

        let mut attention_mask = vec![1u32; input_ids.len()];
        while input_ids.len() < self.max_len {
            input_ids.push(PAD_ID);
            attention_mask.push(0);
        }

        Ok(EncodedText { input_ids, attention_mask })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer_store::TokenizerStore;
    use tempfile::tempdir;

    fn encoder(max_len: usize) -> TextEncoder {
        let dir = tempdir().unwrap();
        let texts = vec![
            "Damlaya damlaya göl olur".to_string(),
            "Sakla samanı gelir zamanı".to_string(),
            "Az tavuk gür öter".to_string(),
        ];
        let store = TokenizerStore::new(dir.path().to_str().unwrap());
        let tokenizer = store.load_or_build(&texts, 1000).unwrap();
        TextEncoder::new(tokenizer, max_len)
    }

    #[test]
    fn test_output_is_fixed_length() {
        let enc = encoder(16);
        let out = enc.encode("Damlaya damlaya göl olur").unwrap();
        assert_eq!(out.input_ids.len(), 16);
        assert_eq!(out.attention_mask.len(), 16);
    }

    #[test]
    fn test_framing_and_mask_agree() {
        let enc = encoder(16);
        let out = enc.encode("Az tavuk gür öter").unwrap();

        assert_eq!(out.input_ids[0], CLS_ID);
        let sep_pos = out.input_ids.iter().position(|&id| id == SEP_ID).unwrap();

        // Everything through [SEP] is real, everything after is padding,
        // and the mask mirrors that split exactly.
        for (i, (&id, &m)) in out.input_ids.iter().zip(&out.attention_mask).enumerate() {
            if i <= sep_pos {
                assert_eq!(m, 1, "position {i} should be unmasked");
            } else {
                assert_eq!(id, PAD_ID);
                assert_eq!(m, 0, "position {i} should be masked");
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let enc = encoder(32);
        let a = enc.encode("Sakla samanı gelir zamanı").unwrap();
        let b = enc.encode("Sakla samanı gelir zamanı").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_input_is_truncated_with_sep_last() {
        let enc = encoder(8);
        let long = "Damlaya damlaya göl olur sakla samanı gelir zamanı az tavuk gür öter";
        let out = enc.encode(long).unwrap();
        assert_eq!(out.input_ids.len(), 8);
        assert_eq!(out.input_ids[7], SEP_ID);
        assert!(out.attention_mask.iter().all(|&m| m == 1));
    }
}
