//! Search index derived from the corpus.
//!
//! Every field the matcher looks at is folded once at build time into a
//! character vector plus a character-class mask, so a query only pays for
//! the alignment itself. A headword map serves exact lookups on submit.
use ahash::AHashMap;

use crate::corpus::Corpus;
use crate::matcher::char_mask;
use crate::utils::{fold, split_glosses};

/// A folded field ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub chars: Vec<char>,
    pub mask: u64,
}

impl Key {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = fold(text).chars().collect();
        let mask = char_mask(&chars);
        Self { chars, mask }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Folded fields of one corpus entry.
#[derive(Debug, Clone)]
pub struct IndexedEntry {
    pub pinyin: Key,
    pub headword: Key,
    pub glosses: Vec<Key>,
}

/// Immutable index over a corpus, one `IndexedEntry` per corpus position.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    entries: Vec<IndexedEntry>,
    headwords: AHashMap<String, Vec<usize>>,
}

impl SearchIndex {
    /// Fold every entry of `corpus`.
    pub fn build(corpus: &Corpus) -> Self {
        let started = std::time::Instant::now();
        let mut headwords: AHashMap<String, Vec<usize>> = AHashMap::with_capacity(corpus.len());

        let entries: Vec<IndexedEntry> = corpus
            .iter()
            .enumerate()
            .map(|(id, entry)| {
                headwords
                    .entry(entry.simplified.trim().to_string())
                    .or_default()
                    .push(id);
                IndexedEntry {
                    pinyin: Key::new(&entry.toneless_pinyin),
                    headword: Key::new(&entry.simplified),
                    glosses: split_glosses(&entry.short_definition)
                        .into_iter()
                        .map(Key::new)
                        .filter(|k| !k.is_empty())
                        .collect(),
                }
            })
            .collect();

        // Most frequent entry first for exact lookups.
        for ids in headwords.values_mut() {
            ids.sort_by_key(|&id| (corpus.entries()[id].rank, id));
        }

        tracing::info!(
            entries = entries.len(),
            headwords = headwords.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built search index"
        );

        Self { entries, headwords }
    }

    pub fn get(&self, id: usize) -> Option<&IndexedEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &IndexedEntry)> {
        self.entries.iter().enumerate()
    }

    /// Corpus positions sharing this exact headword, most frequent first.
    pub fn headword_ids(&self, headword: &str) -> &[usize] {
        self.headwords
            .get(headword.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
