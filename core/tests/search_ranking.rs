// core/tests/search_ranking.rs
//
// Integration tests for SuggestionEngine ranking behaviour.
//
// Tests cover:
// - Closer textual matches outrank tone-numbered and partial matches
// - Rank breaks score ties
// - Result cap keeps the best entries by the score/rank comparator
// - Ordering invariant, determinism and the "nothing better left out"
//   property over the bundled demo corpus

use huoguo_core::{Config, Corpus, SuggestionEngine, WordEntry};

fn engine(entries: Vec<WordEntry>) -> SuggestionEngine {
    SuggestionEngine::from_entries(entries, Config::default()).expect("valid corpus")
}

fn demo_engine() -> SuggestionEngine {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/search_data.json");
    SuggestionEngine::load(path, Config::default()).expect("bundled corpus loads")
}

#[test]
fn exact_pinyin_beats_tone_numbers_beats_partial() {
    let e = engine(vec![
        WordEntry::new("你好", "hello", "ni3hao3", 10),
        WordEntry::new("拟好", "draft", "nihao", 5000),
        WordEntry::new("你的", "your", "nide", 200),
    ]);

    let pinyin: Vec<&str> = e
        .search("nihao")
        .iter()
        .map(|w| w.toneless_pinyin.as_str())
        .collect();
    assert_eq!(pinyin, vec!["nihao", "ni3hao3", "nide"]);
}

#[test]
fn equal_scores_are_ordered_by_rank() {
    let e = engine(vec![
        WordEntry::new("妈", "mother", "ma1", 30),
        WordEntry::new("麻", "hemp", "ma2", 10),
        WordEntry::new("马", "horse", "ma3", 20),
        WordEntry::new("谢谢", "thanks", "xiexie", 5),
        WordEntry::new("是", "to be", "shi", 1),
        WordEntry::new("对", "correct", "dui", 2),
    ]);

    let results = e.search_scored("ma");
    let heads: Vec<&str> = results.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(heads, vec!["麻", "马", "妈"]);
    assert!(results.windows(2).all(|w| w[0].score == w[1].score));
}

#[test]
fn cap_keeps_best_eight_by_comparator() {
    let suffixes = [
        "", "1", "2", "3", "4", "5", "i", "n", "ng", "guo", "yi", "dao", "fen", "hua", "ren",
        "shi", "xing", "ren2", "bi", "li",
    ];
    let entries: Vec<WordEntry> = suffixes
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let rank = (i as u32 * 37) % 20 + 1;
            WordEntry::new(format!("词{i}"), "", format!("de{s}"), rank)
        })
        .collect();
    let e = engine(entries);

    for id in 0..suffixes.len() {
        assert!(e.score("de", id).is_some(), "entry {id} should match");
    }

    let mut expected: Vec<(u32, u32, usize)> = (0..suffixes.len())
        .map(|id| {
            let (score, _) = e.score("de", id).unwrap();
            (score.0, e.entry(id).unwrap().rank, id)
        })
        .collect();
    expected.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
    let expected_ids: Vec<usize> = expected.iter().take(8).map(|t| t.2).collect();

    let got: Vec<usize> = e.search_scored("de").iter().map(|s| s.id).collect();
    assert_eq!(got.len(), 8);
    assert_eq!(got, expected_ids);
    // "de" itself is the only exact match
    assert_eq!(got[0], 0);
}

#[test]
fn ordering_invariant_and_determinism_on_demo_corpus() {
    let e = demo_engine();
    let queries = [
        "ni", "nihao", "ma", "de", "xue", "lvyou", "luyou", "zhonguo", "你", "学", "hello",
        "hot pot", "bejing", "shangahi", "q",
    ];

    for q in queries {
        let first = e.search_scored(q);
        let second = e.search_scored(q);
        assert_eq!(first, second, "query {q:?} is not deterministic");
        assert!(first.len() <= 8);

        for pair in first.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.score > b.score || (a.score == b.score && a.rank <= b.rank),
                "query {q:?}: {a:?} placed before {b:?}"
            );
        }

        if let Some(worst) = first.last() {
            for id in 0..e.len() {
                if first.iter().any(|s| s.id == id) {
                    continue;
                }
                if let Some((score, _)) = e.score(q, id) {
                    assert!(
                        score <= worst.score,
                        "query {q:?}: left out entry {id} scoring {score:?} above {worst:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn typos_and_missing_letters_still_find_words() {
    let e = demo_engine();
    let top = |q: &str| e.search(q).first().map(|w| w.simplified.clone());
    assert_eq!(top("zhonguo").as_deref(), Some("中国"));
    assert_eq!(top("shangahi").as_deref(), Some("上海"));
    assert_eq!(top("bejing").as_deref(), Some("北京"));
    assert_eq!(top("lvyou").as_deref(), Some("旅游"));
    assert_eq!(top("huoguo").as_deref(), Some("火锅"));
}

#[test]
fn search_returns_entries_in_suggestion_order() {
    let e = demo_engine();
    let entries = e.search("ni");
    let scored = e.search_scored("ni");
    assert_eq!(entries.len(), scored.len());
    for (entry, s) in entries.iter().zip(scored.iter()) {
        assert_eq!(entry.simplified, s.text);
        assert_eq!(entry.rank, s.rank);
    }
}

#[test]
fn unmatched_query_is_an_empty_success() {
    let e = demo_engine();
    assert!(e.search("qqqqqqqq").is_empty());
    assert!(e.search("").is_empty());
}

#[test]
fn rebuilt_engine_answers_identically() {
    let corpus = Corpus::load_demo();
    let a = SuggestionEngine::new(corpus.clone());
    let b = SuggestionEngine::new(corpus);
    for q in ["ni", "ma", "xie", "中"] {
        assert_eq!(a.search_scored(q), b.search_scored(q));
    }
}
