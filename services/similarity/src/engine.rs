use tracing::{debug, warn};

use shared::dto::SimilarityPair;

use crate::vectorizer::NgramTfidf;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rounded scores at or below this are discarded as noise. This is
    /// not the "flag as plagiarism" cutoff, which belongs to the caller.
    pub noise_floor: f32,
    pub max_features: usize,
    /// Preview length attached to each emitted pair, in characters.
    pub preview_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            noise_floor: 0.1,
            max_features: 20_000,
            preview_chars: 300,
        }
    }
}

/// Stateless batch ranker. Vectorizes the whole batch jointly, scores
/// every unordered pair by cosine similarity, and returns the pairs
/// above the noise floor, best first.
pub struct SimilarityEngine {
    config: EngineConfig,
    vectorizer: NgramTfidf,
}

impl SimilarityEngine {
    pub fn new(config: EngineConfig) -> Self {
        let vectorizer = NgramTfidf {
            max_features: config.max_features,
            ..NgramTfidf::default()
        };
        Self { config, vectorizer }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    fn preview(&self, text: &str) -> String {
        let mut p: String = text.chars().take(self.config.preview_chars).collect();
        if text.chars().count() > self.config.preview_chars {
            p.push_str("...");
        }
        p
    }

    /// Ranks a batch of normalized texts. Indices in the result refer to
    /// positions in `texts`; `text1_index < text2_index` always holds and
    /// ties keep generation order. Degenerate batches come back empty
    /// rather than failing.
    pub fn rank(&self, texts: &[String]) -> Vec<SimilarityPair> {
        if texts.len() < 2 {
            return Vec::new();
        }

        let vectors = match self.vectorizer.fit_transform(texts) {
            Ok(v) => v,
            Err(e) => {
                warn!(%e, "vectorization failed, returning empty result");
                return Vec::new();
            }
        };

        let mut pairs = Vec::new();
        for i in 0..vectors.len() {
            for j in (i + 1)..vectors.len() {
                let score = ((vectors[i].dot(&vectors[j]) * 1000.0).round() / 10.0).min(100.0);
                if score > self.config.noise_floor {
                    pairs.push(SimilarityPair {
                        text1_index: i,
                        text2_index: j,
                        similarity: score,
                        text1_preview: self.preview(&texts[i]),
                        text2_preview: self.preview(&texts[j]),
                    });
                }
            }
        }

        // stable sort keeps (i, j) generation order for equal scores
        pairs.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        debug!(
            batch = texts.len(),
            pairs = pairs.len(),
            "similarity ranking complete"
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_with_ellipsis() {
        let engine = SimilarityEngine::new(EngineConfig {
            preview_chars: 5,
            ..EngineConfig::default()
        });
        assert_eq!(engine.preview("abcdefgh"), "abcde...");
        assert_eq!(engine.preview("abc"), "abc");
    }

    #[test]
    fn noise_floor_is_tunable() {
        let texts = vec![
            "shared words appear here".to_string(),
            "shared words appear there".to_string(),
        ];
        let strict = SimilarityEngine::new(EngineConfig {
            noise_floor: 99.9,
            ..EngineConfig::default()
        });
        assert!(strict.rank(&texts).is_empty());
    }
}
