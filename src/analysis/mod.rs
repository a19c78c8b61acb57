//! Corpus statistics: speaking rate, summary statistics and word frequency.

pub mod frequency;
pub mod rate;
pub mod stats;
pub mod stopwords;

pub use frequency::{FrequencyMap, WordCounts, WordEntry};
pub use rate::{RateRow, RateTable, word_count, words_per_minute};
pub use stats::{Summary, describe};
pub use stopwords::StopWords;
