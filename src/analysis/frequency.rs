//! Corpus-wide word frequency.
//!
//! Two explicit phases: [`WordCounts::accumulate`] counts every
//! whitespace-delimited token, then [`WordCounts::frequencies`] divides each
//! count by the total token count. Tokens are taken as-is: "The", "the" and
//! "the," are three different words.

use serde::Serialize;
use std::collections::HashMap;

/// Exact occurrence count per distinct word.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCounts {
    counts: HashMap<String, u64>,
    total_tokens: u64,
}

/// Relative frequency per distinct word. Sums to 1 unless empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyMap {
    frequencies: HashMap<String, f64>,
}

/// One row of a ranked word listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordEntry {
    pub word: String,
    pub count: u64,
    pub frequency: f64,
}

impl WordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the tokens of every text in one pass.
    pub fn accumulate<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::new();
        for text in texts {
            counts.add_text(text);
        }
        counts
    }

    pub fn add_text(&mut self, text: &str) {
        for token in text.split_whitespace() {
            self.total_tokens += 1;
            if let Some(count) = self.counts.get_mut(token) {
                *count += 1;
            } else {
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    /// Number of distinct words.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Normalize counts by the total token count.
    pub fn frequencies(&self) -> FrequencyMap {
        if self.total_tokens == 0 {
            return FrequencyMap::default();
        }
        let total = self.total_tokens as f64;
        let frequencies = self
            .counts
            .iter()
            .map(|(word, &count)| (word.clone(), count as f64 / total))
            .collect();
        FrequencyMap { frequencies }
    }

    /// The `n` most frequent words, ties broken alphabetically.
    pub fn top(&self, n: usize) -> Vec<WordEntry> {
        let total = self.total_tokens as f64;
        let mut ranked: Vec<(&String, &u64)> = self.counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(n)
            .map(|(word, &count)| WordEntry {
                word: word.clone(),
                count,
                frequency: count as f64 / total,
            })
            .collect()
    }
}

impl FrequencyMap {
    pub fn get(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.frequencies.iter().map(|(w, &f)| (w.as_str(), f))
    }

    /// Words sorted by frequency descending, then alphabetically.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_records_scenario() {
        let counts = WordCounts::accumulate(["a a b", "b c"]);
        assert_eq!(counts.count("a"), 2);
        assert_eq!(counts.count("b"), 2);
        assert_eq!(counts.count("c"), 1);
        assert_eq!(counts.total_tokens(), 5);
        assert_eq!(counts.distinct(), 3);

        let freqs = counts.frequencies();
        assert_eq!(freqs.get("a"), Some(0.4));
        assert_eq!(freqs.get("b"), Some(0.4));
        assert_eq!(freqs.get("c"), Some(0.2));
        assert_eq!(freqs.get("d"), None);
    }

    #[test]
    fn frequencies_sum_to_one() {
        let counts = WordCounts::accumulate([
            "the quick brown fox",
            "jumps over the lazy dog",
            "The dog sleeps",
        ]);
        let freqs = counts.frequencies();
        let sum: f64 = freqs.iter().map(|(_, f)| f).sum();
        assert!((sum - 1.0).abs() < 1e-12);

        for (word, freq) in freqs.iter() {
            let expected = counts.count(word) as f64 / counts.total_tokens() as f64;
            assert_eq!(freq, expected);
        }
    }

    #[test]
    fn tokens_are_case_and_punctuation_sensitive() {
        let counts = WordCounts::accumulate(["The the the, THE"]);
        assert_eq!(counts.distinct(), 4);
        assert_eq!(counts.count("the"), 1);
    }

    #[test]
    fn empty_transcripts_contribute_nothing() {
        let counts = WordCounts::accumulate(["", "   ", "word"]);
        assert_eq!(counts.total_tokens(), 1);
        assert_eq!(counts.frequencies().get("word"), Some(1.0));
    }

    #[test]
    fn empty_corpus_has_empty_frequencies() {
        let counts = WordCounts::accumulate(std::iter::empty::<&str>());
        assert!(counts.is_empty());
        assert!(counts.frequencies().is_empty());
        assert!(counts.top(5).is_empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let corpus = ["one fish two fish", "red fish blue fish", "one two"];
        let first = WordCounts::accumulate(corpus).frequencies();
        let second = WordCounts::accumulate(corpus).frequencies();
        assert_eq!(first, second);
        for (word, freq) in first.iter() {
            assert_eq!(second.get(word).map(f64::to_bits), Some(freq.to_bits()));
        }
    }

    #[test]
    fn top_ranks_by_count_then_word() {
        let counts = WordCounts::accumulate(["b a c b a d"]);
        let top = counts.top(3);
        let words: Vec<&str> = top.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["a", "b", "c"]);
        assert_eq!(top[0].count, 2);
        assert!((top[0].frequency - 2.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn ranked_frequencies_descending() {
        let freqs = WordCounts::accumulate(["x y y z z z"]).frequencies();
        let ranked = freqs.ranked();
        let words: Vec<&str> = ranked.iter().map(|(w, _)| *w).collect();
        assert_eq!(words, vec!["z", "y", "x"]);
        assert_eq!(freqs.len(), 3);
    }
}
