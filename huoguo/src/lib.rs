//! huoguo crate root
//!
//! The search box that sits on top of `huoguo-core`: an editable query
//! buffer, a single-timer debounce, a per-box result cache and the
//! suggestion dropdown, plus the navigation target built from a chosen word
//! and tone-marked pinyin for display.
//!
//! Public API exported here:
//! - `SearchBox` from `search_box`
//! - `SearchBoxConfig` from `config`
//! - `Route`, `Mode` from `route`
//! - `pinyinize` from `display`

pub mod config;
pub mod debounce;
pub mod display;
pub mod input;
pub mod route;
pub mod search_box;

pub use config::SearchBoxConfig;
pub use debounce::Debouncer;
pub use display::pinyinize;
pub use input::QueryBuffer;
pub use route::{Mode, Route, UnknownMode};
pub use search_box::SearchBox;

// Convenience re-exports for common types used by callers.
pub use huoguo_core::{
    Config, ConfigError, Corpus, CorpusLoadError, MatchField, Suggestion, SuggestionEngine,
    SuggestionList, WordEntry,
};
