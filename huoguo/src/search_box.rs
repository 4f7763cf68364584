//! The search box: input buffer, debounced querying and the suggestion
//! dropdown.
//!
//! Edits never query the engine directly. They reset a single long-lived
//! [`Debouncer`]; the caller drives time with [`SearchBox::tick`], and a
//! search runs at most once per quiet period, for the latest input only.
//! Results for recent queries are kept in an LRU cache so that typing back
//! to an earlier prefix does not search again.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use huoguo_core::{Suggestion, SuggestionEngine, SuggestionList};
use lru::LruCache;

use crate::config::SearchBoxConfig;
use crate::debounce::Debouncer;
use crate::input::QueryBuffer;
use crate::route::{Mode, Route};

pub struct SearchBox {
    engine: Arc<SuggestionEngine>,
    input: QueryBuffer,
    debouncer: Debouncer<String>,
    cache: Option<LruCache<String, Vec<Suggestion>>>,
    results: SuggestionList,
    /// Query the current dropdown was computed for.
    shown_for: Option<String>,
    mode: Mode,
    searches: usize,
    cache_hits: usize,
}

impl SearchBox {
    pub fn new(engine: Arc<SuggestionEngine>, config: &SearchBoxConfig) -> Self {
        Self {
            engine,
            input: QueryBuffer::new(),
            debouncer: Debouncer::new(config.debounce()),
            cache: NonZeroUsize::new(config.cache_size).map(LruCache::new),
            results: SuggestionList::new(),
            shown_for: None,
            mode: config.mode,
            searches: 0,
            cache_hits: 0,
        }
    }

    /// A search box with default settings and the given quiet period.
    pub fn with_debounce(engine: Arc<SuggestionEngine>, quiet: Duration) -> Self {
        let config = SearchBoxConfig {
            debounce_ms: quiet.as_millis() as u64,
            ..SearchBoxConfig::default()
        };
        Self::new(engine, &config)
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &QueryBuffer {
        &self.input
    }

    // ---- input events ----

    /// Replace the whole input, as a paste or programmatic fill does.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        if self.input.set_text(text) {
            self.input_changed(now);
        }
    }

    pub fn type_char(&mut self, ch: char, now: Instant) {
        if self.input.insert_char(ch) {
            self.input_changed(now);
        }
    }

    pub fn type_str(&mut self, s: &str, now: Instant) {
        if self.input.insert_str(s) {
            self.input_changed(now);
        }
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.input.backspace() {
            self.input_changed(now);
        }
    }

    pub fn delete(&mut self, now: Instant) {
        if self.input.delete() {
            self.input_changed(now);
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.input.move_left()
    }

    pub fn move_right(&mut self) -> bool {
        self.input.move_right()
    }

    /// Empty the box and close the dropdown.
    pub fn clear(&mut self) {
        self.input.clear();
        self.close_dropdown();
    }

    fn input_changed(&mut self, now: Instant) {
        if self.input.is_blank() {
            self.close_dropdown();
        } else {
            self.results.deselect();
            self.debouncer.push(self.input.text().to_string(), now);
        }
    }

    fn close_dropdown(&mut self) {
        self.debouncer.cancel();
        self.results.clear();
        self.shown_for = None;
    }

    // ---- time ----

    /// Advance the clock. Runs the pending search if its quiet period has
    /// elapsed; returns whether the dropdown was refreshed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.run(query);
                true
            }
            None => false,
        }
    }

    /// When the next `tick` would run a search.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Run the pending search now, without waiting for the quiet period.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(query) => {
                self.run(query);
                true
            }
            None => false,
        }
    }

    fn run(&mut self, query: String) {
        if self.shown_for.as_deref() == Some(query.as_str()) {
            return;
        }

        let cached = self.cache.as_mut().and_then(|c| c.get(&query).cloned());
        let suggestions = match cached {
            Some(hit) => {
                self.cache_hits += 1;
                hit
            }
            None => {
                let found = self.engine.search_scored(&query);
                self.searches += 1;
                if let Some(cache) = self.cache.as_mut() {
                    cache.put(query.clone(), found.clone());
                }
                found
            }
        };

        tracing::trace!(query = %query, shown = suggestions.len(), "dropdown refreshed");
        self.results.set_suggestions(suggestions);
        self.shown_for = Some(query);
    }

    // ---- dropdown ----

    pub fn results(&self) -> &SuggestionList {
        &self.results
    }

    /// The query the visible results belong to.
    pub fn shown_for(&self) -> Option<&str> {
        self.shown_for.as_deref()
    }

    pub fn is_dropdown_visible(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn select_next(&mut self) -> bool {
        self.results.select_next()
    }

    pub fn select_prev(&mut self) -> bool {
        self.results.select_prev()
    }

    /// Pick row `index` of the dropdown and return where it leads.
    pub fn choose(&mut self, index: usize) -> Option<Route> {
        let mode = self.mode;
        self.results
            .select(index)
            .map(|s| Route::new(s.text.clone(), mode))
    }

    /// Route for the Enter key: the highlighted suggestion, else a word whose
    /// headword is exactly the typed text, else the typed text itself.
    /// Blank input goes nowhere.
    pub fn submit(&mut self) -> Option<Route> {
        self.debouncer.cancel();
        if let Some(selected) = self.results.selected() {
            return Some(Route::new(selected.text.clone(), self.mode));
        }

        let typed = self.input.text().trim();
        if typed.is_empty() {
            return None;
        }
        let headword = match self.engine.lookup(typed) {
            Some(entry) => entry.simplified.clone(),
            None => typed.to_string(),
        };
        Some(Route::new(headword, self.mode))
    }

    // ---- settings and counters ----

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Number of searches executed against the engine.
    pub fn searches_run(&self) -> usize {
        self.searches
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huoguo_core::{Config, WordEntry};

    fn engine() -> Arc<SuggestionEngine> {
        let entries = vec![
            WordEntry::new("你好", "hello", "ni3hao3", 10),
            WordEntry::new("妈", "mother", "ma1", 30),
            WordEntry::new("马", "horse", "ma3", 20),
        ];
        Arc::new(SuggestionEngine::from_entries(entries, Config::default()).unwrap())
    }

    #[test]
    fn flush_runs_pending_search_immediately() {
        let mut sb = SearchBox::with_debounce(engine(), Duration::from_millis(100));
        let now = Instant::now();
        sb.set_text("ma", now);
        assert!(sb.is_pending());
        assert!(!sb.is_dropdown_visible());
        assert!(sb.flush());
        assert!(sb.is_dropdown_visible());
        assert_eq!(sb.shown_for(), Some("ma"));
        assert!(!sb.flush());
    }

    #[test]
    fn choose_and_submit_use_current_mode() {
        let mut sb = SearchBox::with_debounce(engine(), Duration::from_millis(100));
        sb.set_mode(Mode::Traditional);
        sb.set_text("ma", Instant::now());
        sb.flush();
        let route = sb.choose(0).unwrap();
        assert_eq!(route, Route::new("马", Mode::Traditional));
        assert_eq!(sb.submit(), Some(route));
        assert!(sb.choose(9).is_none());
    }

    #[test]
    fn cleared_cache_searches_again() {
        let mut sb = SearchBox::with_debounce(engine(), Duration::from_millis(100));
        let now = Instant::now();
        sb.set_text("ma", now);
        sb.flush();
        sb.set_text("m", now);
        sb.flush();
        sb.clear_cache();
        sb.set_text("ma", now);
        sb.flush();
        assert_eq!(sb.searches_run(), 3);
        assert_eq!(sb.cache_hits(), 0);
    }

    #[test]
    fn mode_toggles_between_scripts() {
        let mut sb = SearchBox::with_debounce(engine(), Duration::from_millis(100));
        assert_eq!(sb.mode(), Mode::Simplified);
        sb.set_mode(sb.mode().other());
        assert_eq!(sb.mode(), Mode::Traditional);
        sb.set_mode(sb.mode().other());
        assert_eq!(sb.mode(), Mode::Simplified);
    }

    #[test]
    fn zero_cache_size_disables_cache() {
        let cfg = SearchBoxConfig {
            cache_size: 0,
            ..SearchBoxConfig::default()
        };
        let mut sb = SearchBox::new(engine(), &cfg);
        let now = Instant::now();
        sb.set_text("ma", now);
        sb.flush();
        sb.set_text("m", now);
        sb.flush();
        sb.set_text("ma", now);
        sb.flush();
        assert_eq!(sb.searches_run(), 3);
        assert_eq!(sb.cache_hits(), 0);
    }
}
