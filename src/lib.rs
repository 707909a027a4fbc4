/// This crate is a small remark generator built on a TF-IDF vectorizer.
/// A free-text context is matched against a curated table by cosine
/// similarity, and a remark of the requested sentiment is picked at random.
pub mod vectorizer;
pub mod utils;
pub mod remark;
pub mod shell;
pub mod config;
pub mod error;

/// TF-IDF Vectorizer
/// Fitted once over a set of keyed documents, then read-only.
///
/// Internally, it holds:
/// - The corpus vocabulary and document frequencies
/// - Sparse TF vectors for each document
/// - An IDF vector cache
///
/// `TFIDFVectorizer<N, K, E>` has the following generic parameters:
/// - `N`: Vector parameter type (f32, f64)
/// - `K`: Document key type (e.g., usize, String)
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
///
/// # Serialization
/// Supported.
pub use vectorizer::TFIDFVectorizer;

/// Corpus for TF-IDF Vectorizer
/// It only manages:
/// - The number of documents
/// - The number of documents in which each token appears
///
/// It is the base data for IDF calculation and fixes the token dimensions.
pub use vectorizer::corpus::Corpus;

/// Token Frequency structure
/// Counts token occurrences within one document.
/// Used as base data for TF calculation.
pub use vectorizer::token::TokenFrequency;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug different weighting strategies
/// into `TFIDFVectorizer<N, K, E>`.
/// `DefaultTFIDFEngine` uses raw counts and smoothed idf.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Similarity scoring
/// - Dot: dot product
/// - CosineSimilarity: cosine similarity, used for context matching
pub use vectorizer::evaluate::scoring::{HitEntry, Hits, SimilarityAlgorithm};

/// Remark table and its row types
pub use remark::{RemarkEntry, RemarkTable, Sentiment};

/// Context matching and remark picking
pub use remark::matcher::{
    ContextMatch, Generation, MatchSet, RemarkMatcher, RemarkOutcome, RemarkSource,
};

pub use config::GeneratorConfig;
pub use error::{RemarkError, Result};
pub use shell::{write_startup, Shell};
