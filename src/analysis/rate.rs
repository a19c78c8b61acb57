//! Speaking rate: word count and words per minute per record.

use serde::Serialize;

use super::stats::{Summary, describe};
use crate::defaults::SECONDS_PER_MINUTE;
use crate::manifest::ManifestTable;

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `wordcount / duration * 60`, with plain IEEE semantics.
///
/// A zero duration yields infinity (or NaN for an empty transcript), a
/// negative one a negative rate. Loading with the default duration policy
/// keeps such records out.
pub fn words_per_minute(wordcount: usize, duration: f64) -> f64 {
    wordcount as f64 / duration * SECONDS_PER_MINUTE
}

/// Derived columns for one manifest record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateRow {
    pub wordcount: usize,
    pub wpm: f64,
}

/// Derived columns for a whole manifest, same order as its records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    rows: Vec<RateRow>,
}

impl RateTable {
    pub fn from_manifest(table: &ManifestTable) -> Self {
        let rows = table
            .records()
            .iter()
            .map(|record| {
                let wordcount = word_count(&record.text);
                RateRow {
                    wordcount,
                    wpm: words_per_minute(wordcount, record.duration),
                }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn wpm_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.wpm).collect()
    }

    /// Rows whose wpm is NaN or infinite.
    pub fn non_finite_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.wpm.is_finite()).count()
    }

    pub fn summary(&self) -> Option<Summary> {
        describe(&self.wpm_column())
    }
}
