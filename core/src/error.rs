//! Error types for corpus loading and configuration.
//!
//! A corpus that cannot be loaded is fatal: `SuggestionEngine` construction
//! returns [`CorpusLoadError`] and no engine exists to answer queries. This is
//! kept apart from an empty result list, which is an ordinary outcome.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a usable corpus.
#[derive(Error, Debug)]
pub enum CorpusLoadError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The JSON corpus does not match the expected record layout.
    #[error("malformed corpus JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The bincode snapshot could not be decoded.
    #[error("malformed corpus snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    /// The corpus holds no entries.
    #[error("corpus is empty")]
    Empty,

    /// An entry has no headword to navigate to.
    #[error("entry {index} has an empty headword")]
    MissingHeadword { index: usize },

    /// The file extension names no known corpus format.
    #[error("unsupported corpus format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl CorpusLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CorpusLoadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure to read or write a TOML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusLoadError>;
