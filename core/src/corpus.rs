//! Static word corpus.
//!
//! The corpus is the ordered list of `WordEntry` records bundled with the
//! dictionary (`search_data.json`). It is loaded once, validated, and never
//! mutated afterwards; the search index is derived from it.
//!
//! Supported sources:
//! - JSON: an array of records carrying `simplified`, `short_definition`,
//!   `toneless_pinyin` and `rank`
//! - bincode: a snapshot written by `save_bincode` (see `huoguo-convert`)

use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use crate::error::{CorpusLoadError, Result};

/// A single dictionary word as seen by the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Headword in simplified characters.
    pub simplified: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_definition: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub toneless_pinyin: String,
    /// Frequency rank. Lower means more frequent.
    pub rank: u32,
}

impl WordEntry {
    pub fn new<S, D, P>(simplified: S, short_definition: D, toneless_pinyin: P, rank: u32) -> Self
    where
        S: Into<String>,
        D: Into<String>,
        P: Into<String>,
    {
        Self {
            simplified: simplified.into(),
            short_definition: short_definition.into(),
            toneless_pinyin: toneless_pinyin.into(),
            rank,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Snapshots store plain rows; bincode cannot replay the JSON null handling.
type SnapshotRow<'a> = (&'a str, &'a str, &'a str, u32);

/// Validated, read-only sequence of word entries.
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<WordEntry>,
}

impl Corpus {
    /// Build a corpus from entries, rejecting an empty list or headword-less
    /// entries.
    pub fn new(entries: Vec<WordEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(CorpusLoadError::Empty);
        }
        if let Some(index) = entries
            .iter()
            .position(|e| e.simplified.trim().is_empty())
        {
            return Err(CorpusLoadError::MissingHeadword { index });
        }
        Ok(Self { entries })
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<WordEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Parse a JSON array of records from any reader.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: Vec<WordEntry> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    /// Load a JSON corpus file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CorpusLoadError::io(path, e))?;
        let corpus = Self::from_json_reader(BufReader::new(file))?;
        tracing::info!(path = %path.display(), entries = corpus.len(), "loaded JSON corpus");
        Ok(corpus)
    }

    /// Save the corpus to a file using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| CorpusLoadError::io(path, e))?;
        let rows: Vec<SnapshotRow<'_>> = self
            .entries
            .iter()
            .map(|e| (e.simplified.as_str(), e.short_definition.as_str(), e.toneless_pinyin.as_str(), e.rank))
            .collect();
        bincode::serialize_into(BufWriter::new(file), &rows)?;
        Ok(())
    }

    /// Load a snapshot produced by `save_bincode`. The snapshot is validated
    /// the same way a JSON corpus is.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CorpusLoadError::io(path, e))?;
        let rows: Vec<(String, String, String, u32)> =
            bincode::deserialize_from(BufReader::new(file))?;
        let entries = rows
            .into_iter()
            .map(|(s, d, p, rank)| WordEntry::new(s, d, p, rank))
            .collect();
        let corpus = Self::new(entries)?;
        tracing::info!(path = %path.display(), entries = corpus.len(), "loaded corpus snapshot");
        Ok(corpus)
    }

    /// Load a corpus, picking the format from the file extension
    /// (`.json`, or `.bin`/`.bincode`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::load_json(path),
            Some("bin") | Some("bincode") => Self::load_bincode(path),
            _ => Err(CorpusLoadError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Small built-in corpus for smoke-testing.
    pub fn load_demo() -> Self {
        let entries = vec![
            WordEntry::new("你好", "hello; hi", "nihao", 312),
            WordEntry::new("你", "you", "ni", 18),
            WordEntry::new("的", "of; possessive particle", "de", 1),
            WordEntry::new("中国", "China", "zhongguo", 95),
            WordEntry::new("谢谢", "thanks; thank you", "xiexie", 740),
            WordEntry::new("妈妈", "mom; mother", "mama", 1021),
            WordEntry::new("吗", "question particle", "ma", 160),
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, id: usize) -> Option<&WordEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordEntry> {
        self.entries.iter()
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated corpus; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_and_null_fields() {
        let json = r#"[
            {"simplified": "你好", "short_definition": "hello", "toneless_pinyin": "nihao", "rank": 3},
            {"simplified": "的", "short_definition": null, "toneless_pinyin": "de", "rank": 1}
        ]"#;
        let corpus = Corpus::from_json_str(json).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get(0).unwrap().toneless_pinyin, "nihao");
        assert_eq!(corpus.get(1).unwrap().short_definition, "");
    }

    #[test]
    fn empty_corpus_is_rejected() {
        let err = Corpus::from_json_str("[]").unwrap_err();
        assert!(matches!(err, CorpusLoadError::Empty));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = Corpus::from_json_str(r#"[{"simplified": "你"}]"#).unwrap_err();
        assert!(matches!(err, CorpusLoadError::Json(_)));
    }

    #[test]
    fn blank_headword_is_rejected() {
        let err = Corpus::new(vec![
            WordEntry::new("你", "you", "ni", 1),
            WordEntry::new("  ", "?", "x", 2),
        ])
        .unwrap_err();
        assert!(matches!(err, CorpusLoadError::MissingHeadword { index: 1 }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Corpus::load("/nonexistent/huoguo/search_data.json").unwrap_err();
        assert!(matches!(err, CorpusLoadError::Io { .. }));
        assert!(err.to_string().contains("search_data.json"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = Corpus::load("words.csv").unwrap_err();
        assert!(matches!(err, CorpusLoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn extension_case_is_ignored() {
        let dir = std::env::temp_dir();
        let json = dir.join(format!("huoguo_corpus_case_{}.JSON", std::process::id()));
        std::fs::write(&json, r#"[{"simplified": "你", "short_definition": "you", "toneless_pinyin": "ni", "rank": 1}]"#).unwrap();
        assert_eq!(Corpus::load(&json).unwrap().len(), 1);
        let _ = std::fs::remove_file(json);

        let bin = dir.join(format!("huoguo_corpus_case_{}.BinCode", std::process::id()));
        Corpus::load_demo().save_bincode(&bin).unwrap();
        assert_eq!(Corpus::load(&bin).unwrap().len(), Corpus::load_demo().len());
        let _ = std::fs::remove_file(bin);
    }

    #[test]
    fn save_and_load_bincode_snapshot() {
        let tmp = std::env::temp_dir().join(format!(
            "huoguo_corpus_test_{}.bincode",
            std::process::id()
        ));
        let corpus = Corpus::load_demo();
        corpus.save_bincode(&tmp).unwrap();
        let loaded = Corpus::load(&tmp).unwrap();
        assert_eq!(loaded.entries(), corpus.entries());
        let _ = std::fs::remove_file(tmp);
    }
}
