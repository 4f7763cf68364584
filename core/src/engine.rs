// core/src/engine.rs
//
// Suggestion engine: corpus + index + matcher behind a single `search` call.

use std::path::Path;
use std::time::Instant;

use crate::corpus::{Corpus, WordEntry};
use crate::error::CorpusLoadError;
use crate::index::{IndexedEntry, SearchIndex};
use crate::matcher::{FuzzyMatcher, Query, Score};
use crate::suggestion::{MatchField, Suggestion};
use crate::Config;

/// Search-as-you-type engine over a static corpus.
///
/// The index is built inside the constructor, so an engine value always has
/// a complete index. Nothing is mutated after construction: `search` takes
/// `&self`, and the engine can be shared behind an `Arc` without locking.
/// To change the corpus or the matching options, build a new engine.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    corpus: Corpus,
    index: SearchIndex,
    matcher: FuzzyMatcher,
    config: Config,
    definition_weight: u32,
}

impl SuggestionEngine {
    /// Build an engine with default matching options.
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, Config::default())
    }

    /// Build an engine, indexing every corpus entry before returning.
    pub fn with_config(corpus: Corpus, config: Config) -> Self {
        let index = SearchIndex::build(&corpus);
        let matcher = FuzzyMatcher::from_config(&config);
        let definition_weight = config.definition_weight_permille();
        Self {
            corpus,
            index,
            matcher,
            config,
            definition_weight,
        }
    }

    /// Validate `entries` as a corpus and build an engine over them.
    pub fn from_entries(entries: Vec<WordEntry>, config: Config) -> Result<Self, CorpusLoadError> {
        Ok(Self::with_config(Corpus::new(entries)?, config))
    }

    /// Load a corpus file (JSON or bincode snapshot) and build an engine.
    ///
    /// Any load failure is returned as is; there is no fallback to an empty
    /// corpus.
    pub fn load<P: AsRef<Path>>(path: P, config: Config) -> Result<Self, CorpusLoadError> {
        let corpus = Corpus::load(path)?;
        Ok(Self::with_config(corpus, config))
    }

    /// Best-matching entries for `query`, at most `max_results` of them.
    ///
    /// An empty query, or one that folds to nothing, returns no entries.
    pub fn search(&self, query: &str) -> Vec<&WordEntry> {
        self.search_scored(query)
            .iter()
            .filter_map(|s| self.corpus.get(s.id))
            .collect()
    }

    /// Like `search`, exposing each match's score, field and corpus position.
    ///
    /// Results are ordered by `Suggestion::ranking_cmp`.
    pub fn search_scored(&self, query: &str) -> Vec<Suggestion> {
        let started = Instant::now();
        let limit = self.config.max_results;
        let prepared = self.matcher.prepare(query);
        if prepared.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<Suggestion> = self
            .index
            .iter()
            .filter_map(|(id, fields)| {
                let (score, field) = self.score_entry(&prepared, fields)?;
                let entry = &self.corpus.entries()[id];
                Some(Suggestion::new(id, entry.simplified.clone(), score, field, entry.rank))
            })
            .collect();
        let matched = hits.len();

        if hits.len() > limit {
            hits.select_nth_unstable_by(limit - 1, Suggestion::ranking_cmp);
            hits.truncate(limit);
        }
        hits.sort_unstable_by(Suggestion::ranking_cmp);

        tracing::debug!(
            query,
            matched,
            returned = hits.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "search"
        );
        hits
    }

    /// Score of a single entry against `query`, or `None` when no field
    /// reaches the threshold. Exposed for ranking diagnostics.
    pub fn score(&self, query: &str, id: usize) -> Option<(Score, MatchField)> {
        let prepared = self.matcher.prepare(query);
        self.score_entry(&prepared, self.index.get(id)?)
    }

    /// Exact headword lookup; the most frequent entry wins.
    pub fn lookup(&self, headword: &str) -> Option<&WordEntry> {
        self.index
            .headword_ids(headword)
            .first()
            .and_then(|&id| self.corpus.get(id))
    }

    pub fn entry(&self, id: usize) -> Option<&WordEntry> {
        self.corpus.get(id)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn score_entry(&self, query: &Query, fields: &IndexedEntry) -> Option<(Score, MatchField)> {
        let mut best = None;

        if self.matcher.may_match(query, fields.pinyin.mask) {
            keep_best(&mut best, self.matcher.score(query, &fields.pinyin.chars), MatchField::Pinyin);
        }

        if query.is_ideographic() && self.matcher.may_match(query, fields.headword.mask) {
            keep_best(
                &mut best,
                self.matcher.score(query, &fields.headword.chars),
                MatchField::Headword,
            );
        }

        if query.has_latin() && self.definition_weight > 0 {
            let threshold = self.matcher.threshold();
            for gloss in fields.glosses.iter() {
                if !self.matcher.may_match(query, gloss.mask) {
                    continue;
                }
                let score = self
                    .matcher
                    .score(query, &gloss.chars)
                    .map(|s| s.weighted(self.definition_weight))
                    .filter(|s| *s >= threshold);
                keep_best(&mut best, score, MatchField::Definition);
            }
        }

        best
    }
}

/// Earlier fields win ties, so pinyin beats headword beats gloss.
fn keep_best(best: &mut Option<(Score, MatchField)>, score: Option<Score>, field: MatchField) {
    if let Some(score) = score {
        if best.map_or(true, |(b, _)| score > b) {
            *best = Some((score, field));
        }
    }
}
