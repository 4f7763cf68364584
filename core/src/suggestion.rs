//! Suggestion types for the search box dropdown.
//!
//! This module provides:
//! - `Suggestion`: one ranked match with its score and matched field
//! - `SuggestionList`: the rendered list with keyboard selection

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::matcher::Score;

/// Which field of a `WordEntry` produced the best score.
///
/// Declaration order is the preference order when two fields score equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchField {
    Pinyin,
    Headword,
    Definition,
}

/// A single ranked suggestion.
///
/// `id` is the entry's position in the corpus and the final tie-break, so
/// two suggestions never compare equal unless they name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: usize,
    /// Headword, used to build the navigation target.
    pub text: String,
    pub score: Score,
    pub field: MatchField,
    pub rank: u32,
}

impl Suggestion {
    pub fn new<T: Into<String>>(id: usize, text: T, score: Score, field: MatchField, rank: u32) -> Self {
        Suggestion {
            id,
            text: text.into(),
            score,
            field,
            rank,
        }
    }

    /// Total ranking order: higher score first, then lower (more frequent)
    /// rank, then earlier corpus position.
    pub fn ranking_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.rank.cmp(&other.rank))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// The rendered suggestion list with an optional highlighted row.
///
/// No row is highlighted after new results arrive; the first `select_next`
/// highlights the top row and `select_prev` from the top row returns focus
/// to the input.
#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    suggestions: Vec<Suggestion>,
    cursor: Option<usize>,
}

impl SuggestionList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_suggestions(suggestions: Vec<Suggestion>) -> Self {
        Self {
            suggestions,
            cursor: None,
        }
    }

    /// Replace the suggestions, clearing the highlight.
    pub fn set_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.suggestions = suggestions;
        self.cursor = None;
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.suggestions.iter()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Index of the highlighted row.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Suggestion> {
        self.cursor.and_then(|i| self.suggestions.get(i))
    }

    /// Move the highlight down. Returns true if it moved.
    pub fn select_next(&mut self) -> bool {
        let next = match self.cursor {
            None if !self.suggestions.is_empty() => 0,
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            _ => return false,
        };
        self.cursor = Some(next);
        true
    }

    /// Move the highlight up; from the top row the highlight is removed.
    /// Returns true if anything changed.
    pub fn select_prev(&mut self) -> bool {
        match self.cursor {
            Some(0) => {
                self.cursor = None;
                true
            }
            Some(i) => {
                self.cursor = Some(i - 1);
                true
            }
            None => false,
        }
    }

    /// Highlight a row directly (e.g., a click or a number key).
    pub fn select(&mut self, index: usize) -> Option<&Suggestion> {
        if index < self.suggestions.len() {
            self.cursor = Some(index);
            self.selected()
        } else {
            None
        }
    }

    /// Remove the highlight, keeping the rows.
    pub fn deselect(&mut self) {
        self.cursor = None;
    }

    pub fn clear(&mut self) {
        self.suggestions.clear();
        self.cursor = None;
    }
}
