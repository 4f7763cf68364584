//! Navigation targets for the word-detail page.
//!
//! The detail page itself (definitions, decompositions, example sentences)
//! lives elsewhere; the search box only needs to name it:
//! `/word/<percent-encoded headword>/?mode=<simplified|traditional>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Character set the detail page renders in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Simplified,
    Traditional,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Simplified => "simplified",
            Mode::Traditional => "traditional",
        }
    }

    /// The mode a "switch script" link points at.
    pub fn other(self) -> Mode {
        match self {
            Mode::Simplified => Mode::Traditional,
            Mode::Traditional => Mode::Simplified,
        }
    }

    /// Parse a `mode` query parameter; anything unrecognised falls back to
    /// simplified.
    pub fn from_param(param: Option<&str>) -> Mode {
        param.and_then(|p| p.parse().ok()).unwrap_or_default()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mode {0:?}, expected \"simplified\" or \"traditional\"")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simplified" => Ok(Mode::Simplified),
            "traditional" => Ok(Mode::Traditional),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word-detail page to navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub headword: String,
    pub mode: Mode,
}

impl Route {
    pub fn new<T: Into<String>>(headword: T, mode: Mode) -> Self {
        Self {
            headword: headword.into(),
            mode,
        }
    }

    /// Path with the headword percent-encoded.
    pub fn path(&self) -> String {
        format!(
            "/word/{}/?mode={}",
            urlencoding::encode(self.headword.trim()),
            self.mode
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_encodes_headword() {
        let r = Route::new("你好", Mode::Simplified);
        assert_eq!(r.path(), "/word/%E4%BD%A0%E5%A5%BD/?mode=simplified");
        let r = Route::new(" a b ", Mode::Traditional);
        assert_eq!(r.to_string(), "/word/a%20b/?mode=traditional");
    }

    #[test]
    fn unknown_mode_falls_back_to_simplified() {
        assert_eq!(Mode::from_param(Some("traditional")), Mode::Traditional);
        assert_eq!(Mode::from_param(Some("klingon")), Mode::Simplified);
        assert_eq!(Mode::from_param(None), Mode::Simplified);
        assert!("Simplified".parse::<Mode>().is_err());
        assert_eq!(Mode::Simplified.other(), Mode::Traditional);
    }
}
