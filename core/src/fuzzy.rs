//! Confusion rules for pinyin letters (`l=n`, `f=h`, ...).
//!
//! A confused pair costs a fraction of a full substitution when the matcher
//! aligns a query letter against a candidate letter.
use ahash::AHashMap;

/// A single confusion rule with penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyRule {
    pub from: char,
    pub to: char,
    /// Weight of the substitution, multiplied by the fuzzy penalty multiplier.
    pub penalty: f32,
}

impl FuzzyRule {
    pub fn new(from: char, to: char, penalty: f32) -> Self {
        Self { from, to, penalty }
    }

    /// Parse `"a=b"` or `"a=b:penalty"`. Both sides must be a single
    /// character; anything else yields `None`.
    pub fn parse(rule: &str, default_penalty: f32) -> Option<Self> {
        let (pair, penalty) = match rule.split_once(':') {
            Some((pair, p)) => (pair, p.trim().parse::<f32>().ok()?),
            None => (rule, default_penalty),
        };
        let (a, b) = pair.split_once('=')?;
        let from = single_char(a)?;
        let to = single_char(b)?;
        if from == to || penalty < 0.0 {
            return None;
        }
        Some(Self::new(from, to, penalty))
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    let c = chars.next()?.to_ascii_lowercase();
    chars.next().is_none().then_some(c)
}

/// Bidirectional confusion table with per-pair substitution costs.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMap {
    costs: AHashMap<(char, char), u32>,
    alternatives: AHashMap<char, Vec<char>>,
}

impl FuzzyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `FuzzyMap` from rule strings. `multiplier` turns a rule's
    /// weight into matcher cost units. Rules that do not parse are skipped
    /// with a warning.
    pub fn from_rules(rules: &[String], multiplier: u32) -> Self {
        let mut fm = FuzzyMap::new();
        for raw in rules {
            match FuzzyRule::parse(raw, 1.0) {
                Some(rule) => fm.add_rule(&rule, multiplier),
                None => tracing::warn!(rule = %raw, "ignoring confusion rule"),
            }
        }
        fm
    }

    /// Add a rule in both directions. When a pair is given twice the cheaper
    /// cost wins.
    pub fn add_rule(&mut self, rule: &FuzzyRule, multiplier: u32) {
        let cost = (rule.penalty * multiplier as f32).round() as u32;
        for (a, b) in [(rule.from, rule.to), (rule.to, rule.from)] {
            self.costs
                .entry((a, b))
                .and_modify(|c| *c = (*c).min(cost))
                .or_insert(cost);
            let alts = self.alternatives.entry(a).or_default();
            if !alts.contains(&b) {
                alts.push(b);
            }
        }
    }

    /// Substitution cost for aligning query letter `a` with candidate letter
    /// `b`, if the pair is confusable.
    pub fn cost(&self, a: char, b: char) -> Option<u32> {
        if self.costs.is_empty() {
            return None;
        }
        self.costs.get(&(a, b)).copied()
    }

    /// Letters confusable with `c`, not including `c` itself.
    pub fn alternatives(&self, c: char) -> &[char] {
        self.alternatives.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.costs.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Default confusion rules for pinyin typed by ear: n/l, f/h, g/k, r/l and
/// the v spelling of ü.
pub fn pinyin_confusion_rules() -> Vec<String> {
    ["l=n:0.5", "f=h:0.5", "k=g:0.5", "r=l:0.5", "v=u:0.5"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rule_forms() {
        assert_eq!(FuzzyRule::parse("l=n", 1.0), Some(FuzzyRule::new('l', 'n', 1.0)));
        assert_eq!(
            FuzzyRule::parse(" F = h :0.25", 1.0),
            Some(FuzzyRule::new('f', 'h', 0.25))
        );
        assert_eq!(FuzzyRule::parse("zh=z", 1.0), None);
        assert_eq!(FuzzyRule::parse("l=n:abc", 1.0), None);
        assert_eq!(FuzzyRule::parse("l", 1.0), None);
        assert_eq!(FuzzyRule::parse("a=a", 1.0), None);
    }

    #[test]
    fn rules_are_bidirectional() {
        let fm = FuzzyMap::from_rules(&["l=n:0.5".to_string()], 100);
        assert_eq!(fm.cost('l', 'n'), Some(50));
        assert_eq!(fm.cost('n', 'l'), Some(50));
        assert_eq!(fm.cost('l', 'r'), None);
        assert_eq!(fm.alternatives('n'), &['l']);
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn cheaper_duplicate_wins_and_bad_rules_are_skipped() {
        let rules = vec!["k=g:0.8".to_string(), "g=k:0.3".to_string(), "sh=s".to_string()];
        let fm = FuzzyMap::from_rules(&rules, 100);
        assert_eq!(fm.cost('k', 'g'), Some(30));
        assert_eq!(fm.alternatives('k'), &['g']);
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn default_rules_parse() {
        let fm = FuzzyMap::from_rules(&pinyin_confusion_rules(), 100);
        assert_eq!(fm.len(), 5);
        assert_eq!(fm.cost('v', 'u'), Some(50));
        assert_eq!(fm.alternatives('l').len(), 2);
    }
}
