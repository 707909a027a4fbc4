use serde::{Deserialize, Serialize};

use crate::error::{RemarkError, Result};

/// Number of distinct contexts kept after ranking
pub const DEFAULT_TOP_N: usize = 3;
/// Minimum cosine similarity for a context to count as a match
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Matching knobs.
/// The threshold is compared with `>=` and no epsilon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub top_n: usize,
    pub similarity_threshold: f64,
    /// print the matched contexts before each remark
    pub show_matches: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            show_matches: true,
        }
    }
}

impl GeneratorConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_show_matches(mut self, show: bool) -> Self {
        self.show_matches = show;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(RemarkError::InvalidConfig("top_n must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(RemarkError::InvalidConfig(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}
