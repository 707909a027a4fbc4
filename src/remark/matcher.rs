use std::fmt;

use indexmap::IndexMap;
use rand::{seq::SliceRandom, RngCore};
use tracing::debug;

use crate::{
    config::GeneratorConfig,
    error::Result,
    remark::{RemarkTable, Sentiment},
    vectorizer::{evaluate::scoring::SimilarityAlgorithm, token::TokenFrequency, TFIDFVectorizer},
};

/// A stored context that passed the threshold
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMatch {
    pub context: String,
    pub score: f64,
}

/// Matched contexts, best first, without duplicates.
/// Empty means nothing reached the threshold.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchSet {
    pub matches: Vec<ContextMatch>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn contains(&self, context: &str) -> bool {
        self.matches.iter().any(|m| m.context == context)
    }

    pub fn score_of(&self, context: &str) -> Option<f64> {
        self.matches.iter().find(|m| m.context == context).map(|m| m.score)
    }
}

impl fmt::Display for MatchSet {
    /// `'rusty car' (Sim: 1.00), 'old shoes' (Sim: 0.41)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.matches.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}' (Sim: {:.2})", m.context, m.score)?;
        }
        Ok(())
    }
}

/// What a generation produced
#[derive(Debug, Clone, PartialEq)]
pub enum RemarkOutcome {
    Remark(String),
    /// no context reached the threshold
    NoMatch { context: String },
    /// contexts matched but none has a remark with this sentiment
    NoRemark { sentiment: Sentiment },
}

impl RemarkOutcome {
    pub fn remark(&self) -> Option<&str> {
        match self {
            RemarkOutcome::Remark(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for RemarkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemarkOutcome::Remark(r) => f.write_str(r),
            RemarkOutcome::NoMatch { context } => write!(
                f,
                "Input context is too unique. Couldn't find a good match for '{}'.",
                context
            ),
            RemarkOutcome::NoRemark { sentiment } => write!(
                f,
                "Found relevant contexts, but no {} remark available for them.",
                sentiment
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub matches: MatchSet,
    pub outcome: RemarkOutcome,
}

/// Anything that turns a context and a sentiment into a remark
pub trait RemarkSource {
    fn generate(&self, context: &str, sentiment: Sentiment, rng: &mut dyn RngCore) -> Generation;

    /// Whether callers should print the matched contexts next to the remark
    fn show_matches(&self) -> bool {
        true
    }
}

/// Fitted, read-only matcher over a remark table.
/// Every row is a document keyed by its table position.
#[derive(Debug, Clone)]
pub struct RemarkMatcher {
    table: RemarkTable,
    vectorizer: TFIDFVectorizer<f64, usize>,
    config: GeneratorConfig,
}

impl RemarkMatcher {
    pub fn new(table: RemarkTable) -> Self {
        let vectorizer = TFIDFVectorizer::fit(
            table
                .entries()
                .iter()
                .enumerate()
                .map(|(idx, e)| (idx, e.context.as_str())),
        );
        debug!(
            rows = vectorizer.doc_num(),
            vocab = vectorizer.vocab_size(),
            "fitted tf-idf vectorizer"
        );
        Self {
            table,
            vectorizer,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(table: RemarkTable, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let mut matcher = Self::new(table);
        matcher.config = config;
        Ok(matcher)
    }

    /// Matcher over the built-in table with default settings
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(RemarkTable::builtin()?))
    }

    pub fn table(&self) -> &RemarkTable {
        &self.table
    }

    pub fn vectorizer(&self) -> &TFIDFVectorizer<f64, usize> {
        &self.vectorizer
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// `(rows, vocabulary)` of the fitted vectors
    pub fn shape(&self) -> (usize, usize) {
        (self.vectorizer.doc_num(), self.vectorizer.vocab_size())
    }

    /// Rank all rows, keep scores `>=` threshold, dedupe contexts and take the first `top_n`.
    pub fn match_contexts(&self, query: &str) -> MatchSet {
        let freq = TokenFrequency::from_text(query);
        let mut hits = self
            .vectorizer
            .similarity(&freq, &SimilarityAlgorithm::CosineSimilarity);
        hits.sort_by_score();

        let mut best: IndexMap<&str, f64> = IndexMap::new();
        for hit in hits.iter() {
            if hit.score < self.config.similarity_threshold {
                // sorted, nothing below can pass
                break;
            }
            if best.len() >= self.config.top_n {
                break;
            }
            if let Some(entry) = self.table.get(hit.key) {
                best.entry(entry.context.as_str()).or_insert(hit.score);
            }
        }

        MatchSet {
            matches: best
                .into_iter()
                .map(|(context, score)| ContextMatch { context: context.to_string(), score })
                .collect(),
        }
    }

    /// Remarks with the given sentiment whose context is in `matches`, in table order
    pub fn candidates(&self, matches: &MatchSet, sentiment: Sentiment) -> Vec<&str> {
        self.table
            .entries()
            .iter()
            .filter(|e| e.sentiment == sentiment && matches.contains(&e.context))
            .map(|e| e.remark.as_str())
            .collect()
    }

    /// Same as [`RemarkSource::generate`] with the thread-local RNG
    pub fn generate_remark(&self, context: &str, sentiment: Sentiment) -> RemarkOutcome {
        self.generate(context, sentiment, &mut rand::thread_rng()).outcome
    }
}

impl RemarkSource for RemarkMatcher {
    fn generate(&self, context: &str, sentiment: Sentiment, rng: &mut dyn RngCore) -> Generation {
        let matches = self.match_contexts(context);
        if matches.is_empty() {
            debug!(context, "no context above threshold");
            return Generation {
                matches,
                outcome: RemarkOutcome::NoMatch { context: context.to_string() },
            };
        }
        debug!(context, matched = %matches, "matched contexts");

        let outcome = match self.candidates(&matches, sentiment).choose(rng) {
            Some(remark) => RemarkOutcome::Remark(remark.to_string()),
            None => RemarkOutcome::NoRemark { sentiment },
        };
        Generation { matches, outcome }
    }

    fn show_matches(&self) -> bool {
        self.config.show_matches
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::remark::RemarkEntry;

    fn matcher() -> RemarkMatcher {
        RemarkMatcher::builtin().unwrap()
    }

    #[test]
    fn fitted_shape() {
        // 11 contexts, 22 distinct words
        assert_eq!(matcher().shape(), (22, 22));
    }

    #[test]
    fn exact_context_scores_one() {
        let m = matcher();
        for ctx in m.table().contexts() {
            let matches = m.match_contexts(ctx);
            let score = matches.score_of(ctx).unwrap();
            assert!((score - 1.0).abs() < 1e-9, "{ctx}: {score}");
            assert_eq!(matches.matches[0].context, ctx);
        }
    }

    #[test]
    fn contexts_are_deduplicated() {
        let matches = matcher().match_contexts("rusty car");
        // both "rusty car" rows score 1.0, the rest share no words
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn rusty_car_positive() {
        let m = matcher();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let generation = m.generate("rusty car", Sentiment::Positive, &mut rng);
            assert_eq!(generation.outcome, RemarkOutcome::Remark("It has character!".into()));
        }
    }

    #[test]
    fn slow_computer_negative() {
        let outcome = matcher().generate_remark("slow computer", Sentiment::Negative);
        assert_eq!(outcome.to_string(), "Is it running on a hamster wheel?");
    }

    #[test]
    fn partial_overlap_matches() {
        let m = matcher();
        let matches = m.match_contexts("slow loading");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches.matches[0].context, "slow computer");
        assert!(matches.matches[0].score >= 0.3);
        let matches = m.match_contexts("old vehicle");
        assert!(matches.contains("old shoes"));
    }

    #[test]
    fn nonsense_is_too_unique() {
        let m = matcher();
        let mut rng = StdRng::seed_from_u64(1);
        let generation = m.generate("xqzv plumbus gorp", Sentiment::Positive, &mut rng);
        assert!(generation.matches.is_empty());
        assert_eq!(
            generation.outcome.to_string(),
            "Input context is too unique. Couldn't find a good match for 'xqzv plumbus gorp'."
        );
    }

    #[test]
    fn threshold_is_inclusive() {
        let table = RemarkTable::builtin().unwrap();
        let baseline = RemarkMatcher::new(table.clone()).match_contexts("slow loading");
        let score = baseline.matches[0].score;
        let config = GeneratorConfig::default().with_similarity_threshold(score);
        let m = RemarkMatcher::with_config(table, config).unwrap();
        assert_eq!(m.match_contexts("slow loading").len(), 1);
    }

    #[test]
    fn top_n_limits_contexts() {
        let table = RemarkTable::from_entries(vec![
            RemarkEntry::new("old car", Sentiment::Positive, "a"),
            RemarkEntry::new("old shoes", Sentiment::Positive, "b"),
            RemarkEntry::new("old boots", Sentiment::Positive, "c"),
            RemarkEntry::new("new hat", Sentiment::Positive, "d"),
        ])
        .unwrap();
        let config = GeneratorConfig::default().with_top_n(2).with_similarity_threshold(0.1);
        let m = RemarkMatcher::with_config(table, config).unwrap();
        let matches = m.match_contexts("old");
        assert_eq!(matches.len(), 2);
        // ties keep table order
        assert_eq!(matches.matches[0].context, "old car");
        assert_eq!(matches.matches[1].context, "old shoes");
    }

    #[test]
    fn missing_sentiment_is_reported_distinctly() {
        let table = RemarkTable::from_entries(vec![
            RemarkEntry::new("wet dog", Sentiment::Positive, "So fluffy when dry!"),
            RemarkEntry::new("cold coffee", Sentiment::Negative, "Did it sit there all day?"),
        ])
        .unwrap();
        let m = RemarkMatcher::new(table);
        let mut rng = StdRng::seed_from_u64(3);
        let generation = m.generate("wet dog", Sentiment::Negative, &mut rng);
        assert!(generation.matches.contains("wet dog"));
        assert_eq!(generation.outcome, RemarkOutcome::NoRemark { sentiment: Sentiment::Negative });
        assert_eq!(
            generation.outcome.to_string(),
            "Found relevant contexts, but no negative remark available for them."
        );
    }

    #[test]
    fn random_picks_stay_in_filtered_set() {
        let m = matcher();
        let mut rng = StdRng::seed_from_u64(42);
        // "old" and "car" pull in "rusty car" and "old shoes"
        let matches = m.match_contexts("old car");
        assert!(matches.contains("rusty car"));
        assert!(matches.contains("old shoes"));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let generation = m.generate("old car", Sentiment::Negative, &mut rng);
            let remark = generation.outcome.remark().unwrap();
            let row = m
                .table()
                .entries()
                .iter()
                .find(|e| e.remark == remark)
                .unwrap_or_else(|| panic!("{remark} is not a table remark"));
            assert_eq!(row.sentiment, Sentiment::Negative, "{remark}");
            assert!(matches.contains(&row.context), "{remark} from {}", row.context);
            seen.insert(row.context.clone());
        }
        // both matched contexts get picked over enough rounds
        assert!(seen.contains("rusty car"));
        assert!(seen.contains("old shoes"));
    }

    #[test]
    fn debug_line_format() {
        let set = MatchSet {
            matches: vec![
                ContextMatch { context: "rusty car".into(), score: 1.0 },
                ContextMatch { context: "old shoes".into(), score: 0.4142 },
            ],
        };
        assert_eq!(set.to_string(), "'rusty car' (Sim: 1.00), 'old shoes' (Sim: 0.41)");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let table = RemarkTable::builtin().unwrap();
        let config = GeneratorConfig::default().with_top_n(0);
        assert!(RemarkMatcher::with_config(table, config).is_err());
    }
}
