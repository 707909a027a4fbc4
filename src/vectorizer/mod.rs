pub mod corpus;
pub mod tfidf;
pub mod token;
pub mod evaluate;

use serde::{Deserialize, Serialize};

use crate::{
    utils::math::vector::ZeroSpVec,
    vectorizer::{
        corpus::Corpus,
        tfidf::{DefaultTFIDFEngine, TFIDFEngine},
        token::TokenFrequency,
    },
};

/// Fitted TF-IDF model over a fixed set of documents.
///
/// The vocabulary is frozen by [`fit`](TFIDFVectorizer::fit); afterwards the
/// vectorizer is read-only and any text can be projected into the same space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "N: Serialize, K: Serialize",
    deserialize = "N: Deserialize<'de>, K: Deserialize<'de>"
))]
pub struct TFIDFVectorizer<N = f64, K = usize, E = DefaultTFIDFEngine>
where
    N: num::Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    /// Document's TF Vector, in fit order
    pub documents: Vec<TFVector<N, K>>,
    /// document frequencies, gives the token dimensions
    pub corpus: Corpus,
    /// IDF Vector
    pub idf_cache: IDFVector<N>,
    #[serde(skip)]
    _marker: std::marker::PhantomData<E>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TFVector<N, K>
where
    N: num::Num + Copy,
{
    /// document key
    pub key: K,
    /// TF Vector
    /// use sparse vector
    pub tf_vec: ZeroSpVec<N>,
    /// sum of tokens of this document
    pub token_sum: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IDFVector<N> {
    /// IDF Vector it is not sparse because every term has a weight
    pub idf_vec: Vec<N>,
    /// document count
    pub doc_num: u64,
}

impl<N, K, E> TFIDFVectorizer<N, K, E>
where
    N: num::Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    /// Fit over `(key, text)` documents.
    /// Documents keep their input order; duplicate texts each count as a document.
    pub fn fit<I, S>(docs: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        S: AsRef<str>,
    {
        let freqs: Vec<(K, TokenFrequency)> = docs
            .into_iter()
            .map(|(key, text)| (key, TokenFrequency::from_text(text.as_ref())))
            .collect();

        let mut corpus = Corpus::new();
        for (_, freq) in &freqs {
            corpus.add_set(&freq.token_set_ref_str());
        }

        // dimensions are only known once every document is in the corpus
        let documents = freqs
            .into_iter()
            .map(|(key, freq)| {
                let mut tf_vec = E::tf_vec(&freq, &corpus);
                tf_vec.shrink_to_fit();
                TFVector { key, tf_vec, token_sum: freq.token_sum() }
            })
            .collect();

        let idf_cache = IDFVector {
            idf_vec: E::idf_vec(&corpus),
            doc_num: corpus.get_doc_num(),
        };

        Self {
            documents,
            corpus,
            idf_cache,
            _marker: std::marker::PhantomData,
        }
    }

    /// Project `text` into the fitted space as an L2 normalized TF-IDF vector.
    /// Unknown tokens carry no weight; text without known tokens gives the zero vector.
    pub fn transform(&self, text: &str) -> ZeroSpVec<f64> {
        let freq = TokenFrequency::from_text(text);
        let tf_vec = E::tf_vec(&freq, &self.corpus);
        self.weighted(&tf_vec)
    }

    /// Apply idf weights to a TF vector and L2 normalize it
    pub fn weighted(&self, tf_vec: &ZeroSpVec<N>) -> ZeroSpVec<f64> {
        let mut out = ZeroSpVec::with_len(self.vocab_size());
        for (idx, tf) in tf_vec.raw_iter() {
            out.push(idx, Into::<f64>::into(*tf) * self.idf_weight(idx));
        }
        let norm = out.norm();
        if norm > 0.0 {
            let mut normalized = ZeroSpVec::with_len(out.len());
            for (idx, v) in out.raw_iter() {
                normalized.push(idx, v / norm);
            }
            return normalized;
        }
        out
    }

    /// idf weight of a dimension, zero when out of range
    #[inline]
    pub fn idf_weight(&self, idx: usize) -> f64 {
        self.idf_cache
            .idf_vec
            .get(idx)
            .copied()
            .map_or(0.0, Into::into)
    }

    /// Number of fitted documents
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    /// Number of token dimensions
    pub fn vocab_size(&self) -> usize {
        self.corpus.vocab_size()
    }

    /// Check if the token exists in the fitted vocabulary
    pub fn contains_token(&self, token: &str) -> bool {
        self.corpus.term_index(token).is_some()
    }

    /// Get TFVector by document key, first match wins
    pub fn get_tf(&self, key: &K) -> Option<&TFVector<N, K>>
    where
        K: PartialEq,
    {
        self.documents.iter().find(|doc| doc.key == *key)
    }
}
