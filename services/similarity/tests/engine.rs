//! Batch ranking behavior over realistic submission scenarios.

use similarity::{clean, EngineConfig, SimilarityEngine};

fn rank(texts: &[&str]) -> Vec<shared::dto::SimilarityPair> {
    let normalized: Vec<String> = texts.iter().map(|t| clean(t)).collect();
    SimilarityEngine::with_defaults().rank(&normalized)
}

#[test]
fn batches_below_two_texts_come_back_empty() {
    let engine = SimilarityEngine::with_defaults();
    assert!(engine.rank(&[]).is_empty());
    assert!(engine.rank(&["only one submission".to_string()]).is_empty());
}

#[test]
fn identical_texts_score_one_hundred() {
    let pairs = rank(&[
        "Machine learning is great for data.",
        "Machine learning is great for data.",
    ]);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].text1_index, 0);
    assert_eq!(pairs[0].text2_index, 1);
    assert!(
        (pairs[0].similarity - 100.0).abs() < 0.11,
        "score was {}",
        pairs[0].similarity
    );
}

#[test]
fn disjoint_alphabets_share_nothing() {
    // case-sensitive vectorization: no character n-gram in common
    let pairs = rank(&["apple banana", "CAR TRAIN"]);
    assert!(pairs.is_empty(), "unexpected pairs: {pairs:?}");
}

#[test]
fn unrelated_third_text_stays_out_of_the_result() {
    let pairs = rank(&[
        "Machine learning models analyze large datasets",
        "Machine learning models analyze big datasets",
        "0123 4567 89",
    ]);
    assert_eq!(pairs.len(), 1, "unexpected pairs: {pairs:?}");
    assert_eq!((pairs[0].text1_index, pairs[0].text2_index), (0, 1));
    assert!(pairs[0].similarity > 70.0, "score was {}", pairs[0].similarity);
}

#[test]
fn indices_are_ordered_and_unique() {
    let pairs = rank(&[
        "students submit coursework essays",
        "students submit coursework essays late",
        "students submit coursework essays early",
        "students submit coursework essays on time",
    ]);
    let mut seen = std::collections::HashSet::new();
    for pair in &pairs {
        assert!(pair.text1_index < pair.text2_index);
        assert!(seen.insert((pair.text1_index, pair.text2_index)));
    }
}

#[test]
fn results_sort_descending_with_stable_ties() {
    let pairs = rank(&[
        "alpha beta gamma delta",
        "alpha beta gamma delta",
        "alpha beta something else entirely different",
    ]);
    for window in pairs.windows(2) {
        assert!(window[0].similarity >= window[1].similarity);
    }
    // (0,1) is the identical pair and must lead
    assert_eq!((pairs[0].text1_index, pairs[0].text2_index), (0, 1));
    // (0,2) and (1,2) score identically; generation order is preserved
    let tail: Vec<(usize, usize)> = pairs[1..]
        .iter()
        .map(|p| (p.text1_index, p.text2_index))
        .collect();
    assert_eq!(tail, vec![(0, 2), (1, 2)]);
}

#[test]
fn ranking_is_a_pure_function() {
    let texts: Vec<String> = [
        "the experiment measured reaction times across participants",
        "the experiment measured reaction times across trials",
        "unrelated اقتصاد سياسة نتائج",
    ]
    .iter()
    .map(|t| clean(t))
    .collect();
    let engine = SimilarityEngine::with_defaults();
    let first = engine.rank(&texts);
    let second = engine.rank(&texts);
    assert_eq!(first, second);
}

#[test]
fn empty_texts_carry_no_similarity_signal() {
    let texts = vec![
        String::new(),
        "real submission content".to_string(),
        String::new(),
    ];
    let pairs = SimilarityEngine::with_defaults().rank(&texts);
    assert!(pairs.is_empty());
}

#[test]
fn all_empty_batch_degrades_to_empty_result() {
    let texts = vec![String::new(), String::new(), String::new()];
    let pairs = SimilarityEngine::with_defaults().rank(&texts);
    assert!(pairs.is_empty());
}

#[test]
fn previews_are_bounded() {
    let long_a = format!("shared prefix {}", "filler words ".repeat(60));
    let long_b = format!("shared prefix {}", "filler words ".repeat(60));
    let pairs = SimilarityEngine::new(EngineConfig::default()).rank(&[long_a, long_b]);
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].text1_preview.ends_with("..."));
    assert_eq!(pairs[0].text1_preview.chars().count(), 303);
}
