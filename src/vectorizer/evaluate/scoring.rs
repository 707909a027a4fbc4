use std::{cmp::Ordering, fmt::Debug};

use crate::vectorizer::{tfidf::TFIDFEngine, token::TokenFrequency, TFIDFVectorizer};

/// Enum for similarity algorithms used in search queries
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SimilarityAlgorithm {
    /// Dot product similarity
    /// Considers both direction and magnitude
    Dot,
    /// Cosine similarity
    /// Considers only direction, bounded to [0, 1] for tf-idf weights
    #[default]
    CosineSimilarity,
}

/// One scored document
#[derive(Debug, Clone, PartialEq)]
pub struct HitEntry<K> {
    pub key: K,
    pub score: f64,
}

/// Structure to store search results
pub struct Hits<K> {
    pub list: Vec<HitEntry<K>>,
}

impl<K> Hits<K> {
    /// Create a new Hits instance
    pub fn new(list: Vec<HitEntry<K>>) -> Self {
        Hits { list }
    }

    /// Sort results by descending score.
    /// The sort is stable, equal scores keep their document order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        // Remove NaN scores
        self.list.retain(|hit| !hit.score.is_nan());
        self.list.sort_by(|a, b| b.score.total_cmp(&a.score));
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry<K>> {
        self.list.iter()
    }
}

impl<K> IntoIterator for Hits<K> {
    type Item = HitEntry<K>;
    type IntoIter = std::vec::IntoIter<HitEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<K> Debug for Hits<K>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // Pretty print with alternate formatting: each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:.6}", hit.key, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.key, hit.score)))
                .finish()
        }
    }
}

impl<N, K, E> TFIDFVectorizer<N, K, E>
where
    K: Clone,
    N: num::Float + Into<f64>,
    E: TFIDFEngine<N>,
{
    /// Score every fitted document against the query token frequency.
    /// Hits come back in document order; call `sort_by_score` to rank them.
    pub fn similarity(&self, freq: &TokenFrequency, algorithm: &SimilarityAlgorithm) -> Hits<K> {
        let list = match algorithm {
            SimilarityAlgorithm::Dot => self.scoring_dot(freq),
            SimilarityAlgorithm::CosineSimilarity => self.scoring_cosine(freq),
        };
        Hits { list }
    }

    /// Scoring by dot product
    fn scoring_dot(&self, freq: &TokenFrequency) -> Vec<HitEntry<K>> {
        let tf = E::tf_vec(freq, &self.corpus);
        self.documents
            .iter()
            .map(|doc| HitEntry {
                key: doc.key.clone(),
                score: tf
                    .raw_iter()
                    .map(|(idx, val)| {
                        let idf = self.idf_weight(idx);
                        let tf2: f64 = doc.tf_vec.get(idx).map_or(0.0, Into::into);
                        let tf1: f64 = (*val).into();
                        tf1 * tf2 * (idf * idf)
                    })
                    .sum::<f64>(),
            })
            .collect()
    }

    /// Scoring by cosine similarity
    /// cosθ = A・B / (|A||B|)
    /// A zero norm on either side scores 0.0
    fn scoring_cosine(&self, freq: &TokenFrequency) -> Vec<HitEntry<K>> {
        let tf_1 = E::tf_vec(freq, &self.corpus);
        self.documents
            .iter()
            .map(|doc| {
                let mut a_it = tf_1.raw_iter();
                let mut b_it = doc.tf_vec.raw_iter();
                let mut a_next = a_it.next();
                let mut b_next = b_it.next();
                let mut norm_a = 0_f64;
                let mut norm_b = 0_f64;
                let mut dot = 0_f64;
                while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
                    match ia.cmp(&ib) {
                        Ordering::Equal => {
                            let idf = self.idf_weight(ia);
                            let wa = Into::<f64>::into(*va) * idf;
                            let wb = Into::<f64>::into(*vb) * idf;
                            norm_a += wa * wa;
                            norm_b += wb * wb;
                            dot += wa * wb;
                            a_next = a_it.next();
                            b_next = b_it.next();
                        }
                        Ordering::Less => {
                            let wa = Into::<f64>::into(*va) * self.idf_weight(ia);
                            norm_a += wa * wa;
                            a_next = a_it.next();
                        }
                        Ordering::Greater => {
                            let wb = Into::<f64>::into(*vb) * self.idf_weight(ib);
                            norm_b += wb * wb;
                            b_next = b_it.next();
                        }
                    }
                }
                // Remaining terms on the query side (a)
                while let Some((ia, va)) = a_next {
                    let wa = Into::<f64>::into(*va) * self.idf_weight(ia);
                    norm_a += wa * wa;
                    a_next = a_it.next();
                }
                // Remaining terms on the document side (b)
                while let Some((ib, vb)) = b_next {
                    let wb = Into::<f64>::into(*vb) * self.idf_weight(ib);
                    norm_b += wb * wb;
                    b_next = b_it.next();
                }
                let denom = norm_a.sqrt() * norm_b.sqrt();
                let score = if denom > 0.0 { dot / denom } else { 0.0 };
                HitEntry { key: doc.key.clone(), score }
            })
            .collect()
    }
}
