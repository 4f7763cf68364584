//! huoguo-core
//!
//! Corpus, fuzzy matcher and suggestion engine behind the huoguo
//! Chinese-English dictionary search box.
//!
//! The engine is built once from a static corpus and then answers
//! search-as-you-type queries (pinyin, simplified characters or English
//! glosses) with a short ranked list of words.
//!
//! Public API:
//! - `WordEntry`, `Corpus` - the static word list and its loaders
//! - `SuggestionEngine` - index construction and `search`
//! - `Suggestion`, `SuggestionList` - ranked results with cursor selection
//! - `FuzzyMatcher`, `FuzzyMap` - the similarity metric and confusion rules
//! - `Config` - ranking and matching options
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{ConfigError, CorpusLoadError};

pub mod corpus;
pub use corpus::{Corpus, WordEntry};

pub mod fuzzy;
pub use fuzzy::{FuzzyMap, FuzzyRule};

pub mod matcher;
pub use matcher::{FuzzyMatcher, Penalties, Query, Score};

pub mod index;
pub use index::SearchIndex;

pub mod engine;
pub use engine::SuggestionEngine;

pub mod suggestion;
pub use suggestion::{MatchField, Suggestion, SuggestionList};

/// Number of suggestions shown under the search box.
pub const DEFAULT_MAX_RESULTS: usize = 8;

/// Matching and ranking configuration.
///
/// Penalties are in cost units where dropping one query letter costs
/// `deletion_penalty`; a field's similarity is the share of the query weight
/// left after subtracting the alignment cost.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of suggestions returned by a search.
    pub max_results: usize,
    /// Minimum similarity (0.0 to 1.0) for an entry to count as a match.
    pub min_similarity: f32,

    /// Letter confusion rules (e.g., "l=n", "f=h:0.5")
    pub fuzzy: Vec<String>,
    /// Multiplied by a confusion rule's weight to get its substitution cost.
    pub fuzzy_penalty_multiplier: u32,

    /// Cost of aligning a query letter with a different candidate letter.
    pub substitution_penalty: u32,
    /// Cost of a query letter with no counterpart in the candidate.
    pub deletion_penalty: u32,
    /// Cost of two adjacent letters typed in swapped order.
    pub transposition_penalty: u32,
    /// Cost of a candidate letter skipped between matched letters.
    pub gap_penalty: u32,
    /// Cost of a tone digit present on only one side.
    pub tone_penalty: u32,
    /// Cost of each candidate character left after the query is consumed.
    pub completion_penalty: u32,

    /// Weight (0.0 to 1.0) applied to matches against the English gloss.
    pub definition_weight: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            min_similarity: 0.4,
            fuzzy: fuzzy::pinyin_confusion_rules(),
            fuzzy_penalty_multiplier: 100,
            substitution_penalty: 100,
            deletion_penalty: 100,
            transposition_penalty: 50,
            gap_penalty: 50,
            tone_penalty: 25,
            completion_penalty: 10,
            definition_weight: 0.9,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Gloss weight in permille.
    pub fn definition_weight_permille(&self) -> u32 {
        (self.definition_weight.clamp(0.0, 1.0) * 1000.0).round() as u32
    }
}

/// Text folding shared by the index and the query path.
pub mod utils {
    use unicode_normalization::char::is_combining_mark;
    use unicode_normalization::UnicodeNormalization;

    /// Fold text into a match key: NFD, combining marks (tone diacritics,
    /// umlaut) dropped, lowercased, separators removed.
    ///
    /// Tone digits are kept; the matcher prices them separately.
    pub fn fold(s: &str) -> String {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .filter(|c| !is_separator(*c))
            .flat_map(char::to_lowercase)
            .collect()
    }

    /// Characters ignored when comparing keys.
    pub fn is_separator(c: char) -> bool {
        c.is_whitespace() || matches!(c, '\'' | '’' | '-' | ':' | '·')
    }

    /// Trailing tone numbers in numbered pinyin (`0` and `5` mark the
    /// neutral tone).
    pub fn is_tone_digit(c: char) -> bool {
        matches!(c, '0'..='5')
    }

    /// CJK unified ideographs, extension A and compatibility ideographs.
    pub fn is_ideograph(c: char) -> bool {
        matches!(c,
            '\u{4E00}'..='\u{9FFF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}')
    }

    /// Split a short definition into glosses on `;`, `,` and `/`.
    pub fn split_glosses(definition: &str) -> Vec<&str> {
        definition
            .split(&[';', ',', '/'][..])
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .collect()
    }

}
