use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Common English function words, dropped before vectorization.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "this", "that", "these", "those",
    "i", "you", "he", "she", "it", "we", "they", "a", "an", "as", "from", "into", "about", "up",
    "down", "out", "off", "over", "under", "again", "further", "then", "once",
];

/// Common Arabic function words and single-letter particles.
const ARABIC_STOP_WORDS: &[&str] = &[
    "في", "من", "إلى", "على", "مع", "هذا", "هذه", "ذلك", "تلك", "و", "ف", "ب", "ل", "ك", "كان",
    "كانت", "يكون", "تكون", "ليس", "ليست", "ما", "ماذا", "كيف", "متى", "أين", "لماذا", "كم", "أي",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ENGLISH_STOP_WORDS
        .iter()
        .chain(ARABIC_STOP_WORDS)
        .copied()
        .collect()
});

fn is_marker_line(line: &str) -> bool {
    line.starts_with("--- ") && line.ends_with(" ---")
}

/// Cleans raw extracted text for vectorization. Order matters: structural
/// page/method marker lines go first, then whitespace runs collapse to
/// single spaces, then stop words are filtered token by token. Case is
/// preserved throughout; the compared scripts carry case-sensitive
/// distinctions.
pub fn clean(raw: &str) -> String {
    let tokens: Vec<&str> = raw
        .lines()
        .filter(|line| !is_marker_line(line.trim()))
        .flat_map(str::split_whitespace)
        .filter(|token| !STOP_WORDS.contains(token))
        .collect();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lines_are_stripped() {
        let raw = "--- Page 1 (Standard) ---\nReal content here\n--- Page 2 (OCR) ---\nmore";
        let cleaned = clean(raw);
        assert!(!cleaned.contains("Page"));
        assert!(!cleaned.contains("Standard"));
        assert!(cleaned.contains("Real content here"));
        assert!(cleaned.contains("more"));
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(clean("one\t\ttwo\n\n   three"), "one two three");
    }

    #[test]
    fn english_stop_words_are_removed() {
        assert_eq!(clean("results of experiment"), "results experiment");
        assert_eq!(clean("the model and data"), "model data");
    }

    #[test]
    fn arabic_stop_words_are_removed() {
        assert_eq!(clean("النتائج في التجربة"), "النتائج التجربة");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(clean("The Model"), "The Model");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \n  "), "");
    }
}
