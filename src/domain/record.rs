// ============================================================
// Layer 3 — Record Domain Type
// ============================================================
// One dataset entry: the proverb text, its semantic category,
// and a free-text explanation of its meaning.
//
// The wire format keeps the Turkish field names of the dataset
// file (`metin` / `kategori` / `anlam`) via serde renames, so an
// existing dataset is read and written byte-compatibly. Records
// in the wild sometimes lack a category; those still take part
// in the meaning lookup but are excluded from training.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A labelled proverb entry as stored in the dataset file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// The proverb itself.
    #[serde(rename = "metin", default)]
    pub text: String,

    /// Semantic category label. Optional on the wire: legacy
    /// entries without one are kept but never trained on.
    #[serde(rename = "kategori", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-text explanation of the proverb's meaning.
    #[serde(rename = "anlam", default)]
    pub meaning: String,
}

impl Record {
    /// Create a fully labelled record (the only kind the
    /// application ever appends).
    pub fn labeled(
        text:     impl Into<String>,
        category: impl Into<String>,
        meaning:  impl Into<String>,
    ) -> Self {
        Self {
            text:     text.into(),
            category: Some(category.into()),
            meaning:  meaning.into(),
        }
    }

    /// A record qualifies for training only when both the text and
    /// the category are present and non-empty.
    pub fn is_trainable(&self) -> bool {
        !self.text.trim().is_empty()
            && self.category.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

/// The sorted, deduplicated set of category labels across `records`.
///
/// Label index `i` always refers to the `i`-th entry of this vector;
/// any change to category membership invalidates previously trained
/// label indices, which is why callers recompute it fresh every time.
pub fn category_set(records: &[Record]) -> Vec<String> {
    let set: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.category.as_deref())
        .filter(|c| !c.trim().is_empty())
        .collect();
    set.into_iter().map(String::from).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_wire_names_round_trip() {
        let json = r#"{"metin":"Damlaya damlaya göl olur","kategori":"emek","anlam":"Küçük birikimler zamanla büyük sonuç verir."}"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        assert_eq!(rec.text, "Damlaya damlaya göl olur");
        assert_eq!(rec.category.as_deref(), Some("emek"));

        let back = serde_json::to_string(&rec).unwrap();
        assert!(back.contains("\"metin\""));
        assert!(back.contains("\"kategori\""));
        assert!(back.contains("\"anlam\""));
    }

    #[test]
    fn test_record_without_category_is_not_trainable() {
        let rec: Record = serde_json::from_str(r#"{"metin":"Az tavuk gür öter"}"#).unwrap();
        assert_eq!(rec.category, None);
        assert!(!rec.is_trainable());
    }

    #[test]
    fn test_record_without_text_is_not_trainable() {
        let rec = Record { text: "  ".into(), category: Some("emek".into()), meaning: String::new() };
        assert!(!rec.is_trainable());
    }

    #[test]
    fn test_category_set_is_sorted_and_deduplicated() {
        let records = vec![
            Record::labeled("a", "sabır", "m1"),
            Record::labeled("b", "emek", "m2"),
            Record::labeled("c", "sabır", "m3"),
            Record { text: "d".into(), category: None, meaning: String::new() },
        ];
        assert_eq!(category_set(&records), vec!["emek".to_string(), "sabır".to_string()]);
    }

    #[test]
    fn test_new_category_changes_the_set() {
        let mut records = vec![Record::labeled("a", "emek", "m")];
        assert_eq!(category_set(&records), vec!["emek".to_string()]);

        records.push(Record::labeled("b", "dostluk", "m"));
        assert_eq!(category_set(&records), vec!["dostluk".to_string(), "emek".to_string()]);
    }
}
