//! Tone-marked rendering of numbered pinyin.
//!
//! `ni3 hao3` renders as `nǐ hǎo`. Neutral tones (`5`, `0`) lose their
//! digit, `v` and `u:` become `ü`. The mark goes on `a` or `e` when present,
//! on the `o` of `ou`, and otherwise on the last vowel.

use once_cell::sync::Lazy;
use phf::phf_map;
use regex::{Captures, Regex};

/// Marked vowels for tones 1 to 4.
static TONE_MARKS: phf::Map<char, [char; 4]> = phf_map! {
    'a' => ['ā', 'á', 'ǎ', 'à'],
    'e' => ['ē', 'é', 'ě', 'è'],
    'i' => ['ī', 'í', 'ǐ', 'ì'],
    'o' => ['ō', 'ó', 'ǒ', 'ò'],
    'u' => ['ū', 'ú', 'ǔ', 'ù'],
    'ü' => ['ǖ', 'ǘ', 'ǚ', 'ǜ'],
};

static NUMBERED_SYLLABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-zÜü:]+)([0-5])").expect("syllable pattern is valid"));

/// Render every numbered syllable in `pinyin` with tone marks. Text without
/// tone digits is returned unchanged.
pub fn pinyinize(pinyin: &str) -> String {
    NUMBERED_SYLLABLE
        .replace_all(pinyin, |caps: &Captures| {
            let tone = caps[2].parse::<usize>().unwrap_or(0);
            mark_syllable(&caps[1], tone)
        })
        .into_owned()
}

/// Mark a single syllable body (without its digit) with `tone`.
pub fn mark_syllable(body: &str, tone: usize) -> String {
    let body = body.to_lowercase().replace("u:", "ü").replace('v', "ü");
    if !(1..=4).contains(&tone) {
        return body;
    }

    let chars: Vec<char> = body.chars().collect();
    let target = chars
        .iter()
        .position(|&c| c == 'a' || c == 'e')
        .or_else(|| {
            chars
                .windows(2)
                .position(|w| w == ['o', 'u'])
        })
        .or_else(|| chars.iter().rposition(|c| TONE_MARKS.contains_key(c)));

    match target {
        Some(i) => chars
            .iter()
            .enumerate()
            .map(|(j, &c)| match TONE_MARKS.get(&c) {
                Some(marks) if j == i => marks[tone - 1],
                _ => c,
            })
            .collect(),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_common_syllables() {
        assert_eq!(pinyinize("ni3hao3"), "nǐhǎo");
        assert_eq!(pinyinize("ni3 hao3"), "nǐ hǎo");
        assert_eq!(pinyinize("Zhong1guo2"), "zhōngguó");
    }

    #[test]
    fn placement_rules() {
        assert_eq!(mark_syllable("xue", 2), "xué");
        assert_eq!(mark_syllable("dou", 4), "dòu");
        assert_eq!(mark_syllable("gui", 4), "guì");
        assert_eq!(mark_syllable("liu", 2), "liú");
        assert_eq!(mark_syllable("lv", 4), "lǜ");
        assert_eq!(mark_syllable("nu:", 3), "nǚ");
    }

    #[test]
    fn neutral_tone_drops_digit() {
        assert_eq!(pinyinize("ma5"), "ma");
        assert_eq!(pinyinize("de0"), "de");
    }

    #[test]
    fn toneless_text_is_untouched() {
        assert_eq!(pinyinize("nihao"), "nihao");
        assert_eq!(pinyinize(""), "");
        assert_eq!(mark_syllable("ng", 2), "ng");
    }
}
