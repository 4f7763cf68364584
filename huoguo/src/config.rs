use std::path::Path;
use std::time::Duration;

use huoguo_core::{Config, ConfigError};
use serde::{Deserialize, Serialize};

use crate::route::Mode;

/// Search box configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All matching and ranking options from `huoguo_core::Config` (flattened via serde)
/// - Debounce quiet period for keystrokes
/// - Size of the per-box query cache
/// - Character set for the word-detail page
///
/// # Example
///
/// ```rust
/// use huoguo::SearchBoxConfig;
///
/// let config = SearchBoxConfig::from_toml_str("debounce_ms = 150\nmax_results = 5").unwrap();
/// assert_eq!(config.debounce_ms, 150);
/// assert_eq!(config.base().max_results, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchBoxConfig {
    /// Base configuration fields (penalties, threshold, result cap, etc.)
    #[serde(flatten)]
    pub base: Config,

    /// Quiet period after the last keystroke before a search runs.
    pub debounce_ms: u64,

    /// Number of recent queries whose results are kept; 0 disables caching.
    pub cache_size: usize,

    /// Character set the detail page opens in.
    pub mode: Mode,
}

impl Default for SearchBoxConfig {
    fn default() -> Self {
        Self {
            base: Config::default(),
            debounce_ms: 100,
            cache_size: 256,
            mode: Mode::Simplified,
        }
    }
}

impl SearchBoxConfig {
    /// Convert into the base config for use with `SuggestionEngine`.
    pub fn into_base(self) -> Config {
        self.base
    }

    pub fn base(&self) -> &Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Config {
        &mut self.base
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
