use std::collections::HashSet;

use huoguo_core::Corpus;
use serde::Serialize;

/// Summary of a corpus, printed by `--stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub entries: usize,
    pub distinct_headwords: usize,
    pub duplicate_headwords: usize,
    pub missing_pinyin: usize,
    pub missing_definition: usize,
    pub max_rank: u32,
}

impl CorpusStats {
    pub fn collect(corpus: &Corpus) -> Self {
        let mut seen = HashSet::new();
        let mut stats = CorpusStats {
            entries: corpus.len(),
            ..Default::default()
        };
        for entry in corpus.iter() {
            if !seen.insert(entry.simplified.as_str()) {
                stats.duplicate_headwords += 1;
            }
            if entry.toneless_pinyin.trim().is_empty() {
                stats.missing_pinyin += 1;
            }
            if entry.short_definition.trim().is_empty() {
                stats.missing_definition += 1;
            }
            stats.max_rank = stats.max_rank.max(entry.rank);
        }
        stats.distinct_headwords = seen.len();
        stats
    }
}
