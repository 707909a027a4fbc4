pub mod matcher;

use std::{fmt, str::FromStr};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{RemarkError, Result};

const BUILTIN_TABLE: &str = include_str!("../../data/remarks.json");

/// Desired tone of a remark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 2] = [Sentiment::Positive, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = RemarkError;

    /// case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("positive") {
            Ok(Sentiment::Positive)
        } else if s.eq_ignore_ascii_case("negative") {
            Ok(Sentiment::Negative)
        } else {
            Err(RemarkError::InvalidSentiment(s.to_string()))
        }
    }
}

/// One curated (context, sentiment, remark) row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemarkEntry {
    pub context: String,
    pub sentiment: Sentiment,
    pub remark: String,
}

impl RemarkEntry {
    pub fn new(
        context: impl Into<String>,
        sentiment: Sentiment,
        remark: impl Into<String>,
    ) -> Self {
        Self {
            context: context.into(),
            sentiment,
            remark: remark.into(),
        }
    }
}

/// Immutable, ordered remark table.
/// Rows are identified by position only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemarkTable {
    entries: Vec<RemarkEntry>,
}

impl RemarkTable {
    /// The curated table shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TABLE)
    }

    /// Parse a JSON array of entries
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RemarkEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<RemarkEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(RemarkError::EmptyTable);
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[RemarkEntry] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&RemarkEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct contexts in table order
    pub fn contexts(&self) -> IndexSet<&str> {
        self.entries.iter().map(|e| e.context.as_str()).collect()
    }

    /// `(context, sentiment)` pairs with no entry.
    /// Such contexts can match but never yield a remark of that tone.
    pub fn missing_sentiments(&self) -> Vec<(&str, Sentiment)> {
        self.contexts()
            .into_iter()
            .flat_map(|ctx| Sentiment::ALL.into_iter().map(move |s| (ctx, s)))
            .filter(|(ctx, s)| {
                !self
                    .entries
                    .iter()
                    .any(|e| e.context == *ctx && e.sentiment == *s)
            })
            .collect()
    }
}
