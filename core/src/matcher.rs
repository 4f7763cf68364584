//! Fuzzy similarity between a query and a single field.
//!
//! The score is a weighted alignment cost: the whole query must be consumed
//! while the candidate may stop early, so typing the start of a word scores
//! well. Skipped tone digits cost little on either side, adjacent
//! transpositions cost half a substitution, and configured confusion pairs
//! (see [`FuzzyMap`]) cost less than an arbitrary substitution.
//!
//! Costs are integers so equal alignments produce exactly equal scores and
//! ranking stays a total order.

use serde::{Deserialize, Serialize};

use crate::fuzzy::FuzzyMap;
use crate::utils::{is_ideograph, is_tone_digit};
use crate::Config;

/// Similarity in permille, `0..=1000`. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Score(pub u32);

impl Score {
    pub const MAX: Score = Score(1000);

    /// Scale by a `0.0..=1.0` weight.
    pub fn weighted(self, weight: u32) -> Score {
        Score(self.0 * weight.min(1000) / 1000)
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32 / 1000.0
    }
}

/// Alignment penalties, in the same units as `Config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalties {
    pub substitution: u32,
    pub deletion: u32,
    pub transposition: u32,
    pub gap: u32,
    pub tone: u32,
    pub completion: u32,
}

impl Penalties {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            substitution: cfg.substitution_penalty,
            deletion: cfg.deletion_penalty.max(1),
            transposition: cfg.transposition_penalty,
            gap: cfg.gap_penalty,
            tone: cfg.tone_penalty.max(1),
            completion: cfg.completion_penalty,
        }
    }
}

/// Prepared query: folded characters plus their total weight.
#[derive(Debug, Clone)]
pub struct Query {
    chars: Vec<char>,
    weight: u64,
    mask: u64,
    ideographic: bool,
    has_latin: bool,
}

impl Query {
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Sum of the drop costs of every query character.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Character-class mask including confusion alternatives.
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// True when the query holds any CJK ideograph.
    pub fn is_ideographic(&self) -> bool {
        self.ideographic
    }

    /// True when the query holds any ASCII letter.
    pub fn has_latin(&self) -> bool {
        self.has_latin
    }
}

/// Bit per ASCII letter and digit; every other character shares bit 63.
pub fn char_mask(chars: &[char]) -> u64 {
    chars.iter().fold(0u64, |m, &c| m | char_bit(c))
}

fn char_bit(c: char) -> u64 {
    match c {
        'a'..='z' => 1 << (c as u32 - 'a' as u32),
        '0'..='9' => 1 << (26 + c as u32 - '0' as u32),
        _ => 1 << 63,
    }
}

/// Weighted alignment scorer.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    penalties: Penalties,
    confusions: FuzzyMap,
    threshold: Score,
}

impl FuzzyMatcher {
    pub fn new(penalties: Penalties, confusions: FuzzyMap, min_similarity: f32) -> Self {
        // A zero score never counts as a match.
        let threshold = Score(((min_similarity.clamp(0.0, 1.0) * 1000.0).round() as u32).max(1));
        Self {
            penalties,
            confusions,
            threshold,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Penalties::from_config(cfg),
            FuzzyMap::from_rules(&cfg.fuzzy, cfg.fuzzy_penalty_multiplier),
            cfg.min_similarity,
        )
    }

    pub fn threshold(&self) -> Score {
        self.threshold
    }

    /// Fold raw input into a prepared query.
    pub fn prepare(&self, raw: &str) -> Query {
        let chars: Vec<char> = crate::utils::fold(raw).chars().collect();
        let weight = chars
            .iter()
            .fold(0u64, |w, &c| w.saturating_add(self.drop_cost(c)));
        let mut mask = char_mask(&chars);
        for &c in &chars {
            for &alt in self.confusions.alternatives(c) {
                mask |= char_bit(alt);
            }
        }
        Query {
            ideographic: chars.iter().any(|&c| is_ideograph(c)),
            has_latin: chars.iter().any(|c| c.is_ascii_alphabetic()),
            chars,
            weight,
            mask,
        }
    }

    /// Whether a field with `field_mask` can possibly reach a positive score.
    ///
    /// Only valid while a substitution costs at least a deletion; otherwise
    /// every field is a candidate.
    pub fn may_match(&self, query: &Query, field_mask: u64) -> bool {
        self.penalties.substitution < self.penalties.deletion || query.mask & field_mask != 0
    }

    /// Similarity of `candidate` to `query`, or `None` below the threshold.
    pub fn score(&self, query: &Query, candidate: &[char]) -> Option<Score> {
        if query.is_empty() || candidate.is_empty() {
            return None;
        }
        let budget = self.budget(query.weight);
        if self.length_bound(query, candidate.len()) > budget {
            return None;
        }
        let cost = self.bounded_cost(&query.chars, candidate, budget)?;
        let kept = u128::from(query.weight - cost.min(query.weight));
        let score = Score((kept * 1000 / u128::from(query.weight)) as u32);
        (score >= self.threshold).then_some(score)
    }

    /// Largest alignment cost that still reaches the threshold for a query
    /// of weight `weight`.
    fn budget(&self, weight: u64) -> u64 {
        let weight = u128::from(weight);
        let needed = (u128::from(self.threshold.0) * weight).div_ceil(1000);
        (weight - needed.min(weight)) as u64
    }

    /// Lower bound on the cost when the candidate is shorter than the query:
    /// every query character without a partner has to be dropped.
    fn length_bound(&self, query: &Query, candidate_len: usize) -> u64 {
        let unpaired = query.chars.len().saturating_sub(candidate_len) as u64;
        let cheapest = self.penalties.deletion.min(self.penalties.tone);
        unpaired.saturating_mul(u64::from(cheapest))
    }

    /// Minimum alignment cost of the whole query against a prefix of
    /// `candidate`, plus the completion cost of the unconsumed tail.
    pub fn cost(&self, query: &[char], candidate: &[char]) -> u64 {
        self.bounded_cost(query, candidate, u64::MAX)
            .unwrap_or(u64::MAX)
    }

    /// Like `cost`, giving up with `None` as soon as the cost must exceed
    /// `budget`.
    fn bounded_cost(&self, query: &[char], candidate: &[char], budget: u64) -> Option<u64> {
        let transposition = u64::from(self.penalties.transposition);
        let completion = u64::from(self.penalties.completion);
        let m = candidate.len();

        // Three rolling rows; the oldest is needed for transpositions.
        let mut prev2 = vec![0u64; m + 1];
        let mut prev = vec![0u64; m + 1];
        let mut cur = vec![0u64; m + 1];

        for j in 1..=m {
            prev[j] = prev[j - 1].saturating_add(self.skip_cost(candidate[j - 1]));
        }
        let mut prev_min = 0u64;

        for i in 1..=query.len() {
            let q = query[i - 1];
            let drop_q = self.drop_cost(q);
            cur[0] = prev[0].saturating_add(drop_q);
            let mut row_min = cur[0];
            for j in 1..=m {
                let c = candidate[j - 1];
                let mut best = prev[j - 1].saturating_add(self.substitution_cost(q, c));
                best = best.min(cur[j - 1].saturating_add(self.skip_cost(c)));
                best = best.min(prev[j].saturating_add(drop_q));
                if i > 1 && j > 1 && q != c && q == candidate[j - 2] && query[i - 2] == c {
                    best = best.min(prev2[j - 2].saturating_add(transposition));
                }
                cur[j] = best;
                row_min = row_min.min(best);
            }
            // Every later row builds on the last two, so once both are over
            // budget the final cost is too.
            if row_min > budget && prev_min > budget {
                return None;
            }
            prev_min = row_min;
            std::mem::swap(&mut prev2, &mut prev);
            std::mem::swap(&mut prev, &mut cur);
        }

        let cost = (0..=m)
            .map(|j| prev[j].saturating_add(((m - j) as u64).saturating_mul(completion)))
            .min()
            .unwrap_or(0);
        (cost <= budget).then_some(cost)
    }

    fn drop_cost(&self, c: char) -> u64 {
        u64::from(if is_tone_digit(c) {
            self.penalties.tone
        } else {
            self.penalties.deletion
        })
    }

    fn skip_cost(&self, c: char) -> u64 {
        u64::from(if is_tone_digit(c) {
            self.penalties.tone
        } else {
            self.penalties.gap
        })
    }

    fn substitution_cost(&self, q: char, c: char) -> u64 {
        if q == c {
            0
        } else {
            let full = self.penalties.substitution;
            u64::from(self.confusions.cost(q, c).map_or(full, |cost| cost.min(full)))
        }
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
