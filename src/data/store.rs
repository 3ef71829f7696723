// ============================================================
// Layer 4 — Dataset Store
// ============================================================
// Loads and persists the flat proverb collection from a single
// JSON document:
//
//   {
//     "atasozleri": [
//       { "metin": "...", "kategori": "...", "anlam": "..." },
//       ...
//     ]
//   }
//
// Append-only from the application's perspective: there is no
// in-place edit or delete. Every append rewrites the whole file,
// preserving the existing order and putting the new entry last.
// The rewrite goes through a temp file in the same directory and
// an atomic rename, so a crash mid-write leaves the previous
// dataset intact. Concurrent external edits between the read and
// the rename are still a lost-update hazard; single-user scale
// accepts that.
//
// Reference: Rust Book §9 (Error Handling), §12 (File I/O)

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::domain::error::{Error, Result};
use crate::domain::record::{category_set, Record};

/// Wire shape of the dataset file: one top-level collection key.
#[derive(Debug, Serialize, Deserialize)]
struct DatasetFile {
    #[serde(rename = "atasozleri")]
    records: Vec<Record>,
}

/// File-backed store of proverb records.
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the backing file.
    ///
    /// Fails with `Io` when the file is missing or unreadable and
    /// with `Parse` when it exists but is not the expected shape.
    pub fn load(&self) -> Result<Vec<Record>> {
        let raw = fs::read_to_string(&self.path)?;
        let file: DatasetFile = serde_json::from_str(&raw)?;
        Ok(file.records)
    }

    /// Append one record and persist immediately.
    ///
    /// Whole-file rewrite: read the current list, push the new entry
    /// at the end, serialise, and atomically replace the file.
    pub fn append(&self, record: Record) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        self.write_all(&records)
    }

    /// The current Category Set: sorted distinct `kategori` values
    /// across all records, recomputed fresh on every call.
    pub fn categories(&self) -> Result<Vec<String>> {
        Ok(category_set(&self.load()?))
    }

    fn write_all(&self, records: &[Record]) -> Result<()> {
        let file = DatasetFile { records: records.to_vec() };
        let json = serde_json::to_string_pretty(&file)?;

        // Temp file must live in the target directory so the final
        // rename never crosses a filesystem boundary.
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded_store(dir: &Path) -> DatasetStore {
        let path = dir.join("atasozleri.json");
        fs::write(
            &path,
            r#"{"atasozleri":[
                {"metin":"Damlaya damlaya göl olur","kategori":"emek","anlam":"Küçük birikimler zamanla büyük sonuç verir."},
                {"metin":"Sakla samanı gelir zamanı","kategori":"tutumluluk","anlam":"Gereksiz görünen şeyler ileride gerekebilir."}
            ]}"#,
        )
        .unwrap();
        DatasetStore::new(path)
    }

    #[test]
    fn test_load_reads_all_records() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path());
        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Damlaya damlaya göl olur");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let store = DatasetStore::new(dir.path().join("nope.json"));
        assert!(matches!(store.load(), Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let store = DatasetStore::new(path);
        assert!(matches!(store.load(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_append_preserves_order_and_adds_last() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path());

        store
            .append(Record::labeled("Az tavuk gür öter", "emek", "Azı çok gösterme çabası"))
            .unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "Damlaya damlaya göl olur");
        assert_eq!(records[2].text, "Az tavuk gür öter");
    }

    #[test]
    fn test_append_keeps_turkish_wire_names() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path());
        store
            .append(Record::labeled("İşleyen demir pas tutmaz", "emek", "Çalışan insan dinç kalır."))
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"atasozleri\""));
        assert!(raw.contains("\"metin\""));
        assert!(!raw.contains("\"text\""));
    }

    #[test]
    fn test_categories_are_sorted_and_fresh() {
        let dir = tempdir().unwrap();
        let store = seeded_store(dir.path());
        assert_eq!(store.categories().unwrap(), vec!["emek", "tutumluluk"]);

        store
            .append(Record::labeled("Bir elin nesi var", "dostluk", "İki elin sesi var."))
            .unwrap();
        assert_eq!(store.categories().unwrap(), vec!["dostluk", "emek", "tutumluluk"]);
    }
}
