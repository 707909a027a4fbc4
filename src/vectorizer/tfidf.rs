use num::Num;

use crate::{utils::math::vector::ZeroSpVec, vectorizer::{corpus::Corpus, token::TokenFrequency}};

/// Weighting strategy used by [`TFIDFVectorizer`](crate::TFIDFVectorizer).
///
/// Vectors are laid out in the corpus term order, so dimension `i` of a TF
/// vector and of the IDF vector refer to the same term.
pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// Build the IDF vector for every term of the corpus
    /// # Arguments
    /// * `corpus` - fitted corpus
    /// # Returns
    /// * `Vec<N>` - one weight per corpus term
    fn idf_vec(corpus: &Corpus) -> Vec<N>;

    /// Build the TF vector of a document
    /// Tokens unknown to the corpus are dropped.
    /// # Arguments
    /// * `freq` - token counts of the document
    /// * `corpus` - fitted corpus, gives the dimensions
    fn tf_vec(freq: &TokenFrequency, corpus: &Corpus) -> ZeroSpVec<N>;
}

/// Default TF-IDF engine
/// - tf: raw count of the term in the document
/// - idf: `ln((1 + n) / (1 + df)) + 1` (smoothed, never zero)
///
/// Implemented for `f32` and `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    /// Smoothed idf of a term with document frequency `doc_freq` among `doc_num` documents
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

macro_rules! impl_default_engine {
    ($($t:ty),*) => {
        $(
            impl TFIDFEngine<$t> for DefaultTFIDFEngine {
                fn idf_vec(corpus: &Corpus) -> Vec<$t> {
                    let doc_num = corpus.get_doc_num();
                    corpus
                        .terms()
                        .map(|term| Self::idf_calc(doc_num, corpus.get_term_count(term)) as $t)
                        .collect()
                }

                fn tf_vec(freq: &TokenFrequency, corpus: &Corpus) -> ZeroSpVec<$t> {
                    let mut tf_vec = ZeroSpVec::with_len(corpus.vocab_size());
                    for (token, count) in freq.iter() {
                        // out of vocabulary is ignored
                        if let Some(idx) = corpus.term_index(token) {
                            tf_vec.push(idx, count as $t);
                        }
                    }
                    tf_vec
                }
            }
        )*
    };
}

impl_default_engine!(f32, f64);
