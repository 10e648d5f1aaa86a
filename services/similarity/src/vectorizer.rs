use std::collections::HashMap;

use shared::error::{AppError, Result};

/// Characters eligible as n-gram material: ASCII letters and digits, the
/// Arabic block, Greek letters (mathematical notation), and common
/// math/punctuation symbols. Everything else splits tokens.
fn is_feature_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ('\u{0600}'..='\u{06FF}').contains(&c)
        || ('\u{0370}'..='\u{03FF}').contains(&c)
        || "+-×÷=√∑∏∫∞≈≠≤≥.,;:!?()[]{}".contains(c)
}

/// Sparse L2-normalized feature vector; indices sorted ascending.
#[derive(Debug, Clone, Default)]
pub struct FeatureVector {
    indices: Vec<u32>,
    weights: Vec<f32>,
}

impl FeatureVector {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Two-pointer merge-join over the sorted index lists. Both vectors
    /// are unit length, so this is also their cosine similarity.
    pub fn dot(&self, other: &Self) -> f32 {
        let mut result = 0.0_f32;
        let mut i = 0;
        let mut j = 0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    result += self.weights[i] * other.weights[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        result
    }
}

/// Word-bounded character n-gram TF-IDF vectorizer. N-grams never cross
/// token boundaries and n-grams longer than their token are not emitted;
/// weighting is sub-linear term frequency times smoothed inverse
/// document frequency. Vocabulary selection and index assignment are
/// fully deterministic, so identical batches vectorize identically.
pub struct NgramTfidf {
    pub min_n: usize,
    pub max_n: usize,
    pub max_features: usize,
}

impl Default for NgramTfidf {
    fn default() -> Self {
        Self {
            min_n: 1,
            max_n: 6,
            max_features: 20_000,
        }
    }
}

impl NgramTfidf {
    fn ngram_counts(&self, text: &str) -> HashMap<String, u32> {
        let mut counts = HashMap::new();
        for token in text
            .split(|c: char| !is_feature_char(c))
            .filter(|t| !t.is_empty())
        {
            let chars: Vec<char> = token.chars().collect();
            for n in self.min_n..=self.max_n.min(chars.len()) {
                for start in 0..=chars.len() - n {
                    let gram: String = chars[start..start + n].iter().collect();
                    *counts.entry(gram).or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Jointly vectorizes the batch. Fails only when no document yields a
    /// single feature (a degenerate all-empty batch); the caller maps
    /// that to an empty result.
    pub fn fit_transform(&self, docs: &[String]) -> Result<Vec<FeatureVector>> {
        let doc_counts: Vec<HashMap<String, u32>> =
            docs.iter().map(|d| self.ngram_counts(d)).collect();

        let mut corpus: HashMap<&str, u64> = HashMap::new();
        let mut df: HashMap<&str, u32> = HashMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                *corpus.entry(term.as_str()).or_insert(0) += u64::from(count);
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        if corpus.is_empty() {
            return Err(AppError::Vectorization(
                "no features survived tokenization".into(),
            ));
        }

        // cap by total corpus frequency; lexicographic tie-break keeps
        // the selection deterministic
        let mut ranked: Vec<(&str, u64)> = corpus.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut vocab: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        vocab.sort_unstable();
        let index: HashMap<&str, u32> = vocab
            .iter()
            .enumerate()
            .map(|(i, term)| (*term, i as u32))
            .collect();

        let n_docs = docs.len() as f32;
        let idf: Vec<f32> = vocab
            .iter()
            .map(|term| ((1.0 + n_docs) / (1.0 + df[term] as f32)).ln() + 1.0)
            .collect();

        let vectors = doc_counts
            .iter()
            .map(|counts| {
                let mut entries: Vec<(u32, f32)> = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        index.get(term.as_str()).map(|&i| {
                            let tf = 1.0 + (count as f32).ln();
                            (i, tf * idf[i as usize])
                        })
                    })
                    .collect();
                entries.sort_unstable_by_key(|&(i, _)| i);

                let norm = entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
                let (indices, weights) = entries
                    .into_iter()
                    .map(|(i, w)| (i, if norm > 0.0 { w / norm } else { w }))
                    .unzip();
                FeatureVector { indices, weights }
            })
            .collect();
        Ok(vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(text: &str) -> HashMap<String, u32> {
        NgramTfidf::default().ngram_counts(text)
    }

    #[test]
    fn ngrams_stay_inside_word_boundaries() {
        let counts = grams("ab cd");
        assert!(counts.contains_key("ab"));
        assert!(counts.contains_key("cd"));
        assert!(!counts.contains_key("b c"));
        assert!(!counts.contains_key("bc"));
    }

    #[test]
    fn long_ngrams_are_capped_at_token_length() {
        let counts = grams("hi");
        assert!(counts.contains_key("hi"));
        assert!(counts.keys().all(|g| g.chars().count() <= 2));
    }

    #[test]
    fn alphabet_is_restricted() {
        let counts = grams("a@b");
        assert!(counts.contains_key("a"));
        assert!(counts.contains_key("b"));
        assert!(!counts.keys().any(|g| g.contains('@')));
    }

    #[test]
    fn arabic_text_produces_features() {
        let counts = grams("البيانات");
        assert!(!counts.is_empty());
    }

    #[test]
    fn identical_documents_get_identical_unit_vectors() {
        let docs = vec!["same words here".to_string(), "same words here".to_string()];
        let vectors = NgramTfidf::default().fit_transform(&docs).unwrap();
        assert!((vectors[0].dot(&vectors[1]) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_batch_is_a_vectorization_error() {
        let docs = vec![String::new(), String::new()];
        assert!(NgramTfidf::default().fit_transform(&docs).is_err());
    }

    #[test]
    fn empty_document_gets_empty_vector() {
        let docs = vec!["content".to_string(), String::new()];
        let vectors = NgramTfidf::default().fit_transform(&docs).unwrap();
        assert!(!vectors[0].is_empty());
        assert!(vectors[1].is_empty());
        assert_eq!(vectors[0].dot(&vectors[1]), 0.0);
    }
}
