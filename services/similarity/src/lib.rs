//! Pairwise lexical similarity over a batch of extracted texts.
//!
//! The normalizer strips extraction artifacts and bilingual stop words,
//! the vectorizer turns each text into word-bounded character n-gram
//! TF-IDF vectors, and the engine ranks every document pair by cosine
//! similarity. The whole thing is a pure batch computation: no state
//! survives a call, and the same batch always ranks the same way.

pub mod engine;
pub mod normalize;
pub mod vectorizer;

pub use engine::{EngineConfig, SimilarityEngine};
pub use normalize::clean;
pub use vectorizer::NgramTfidf;
