//! Stopwords left out of the word cloud.

use std::collections::HashSet;

use crate::config::CloudConfig;

/// Common English function words, as shipped with general-purpose word-cloud tooling.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers", "herself",
    "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll", "i'm", "i've",
    "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just", "k", "let's", "like",
    "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's", "should",
    "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the", "their",
    "theirs", "them", "themselves", "then", "there", "there's", "therefore", "these", "they",
    "they'd", "they'll", "they're", "they've", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
    "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while", "who",
    "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "www", "you", "you'd",
    "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
];

/// Case-insensitive stopword set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::empty().with_extra(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Stopwords as configured for the cloud.
    pub fn from_config(config: &CloudConfig) -> Self {
        let base = if config.default_stopwords {
            Self::english()
        } else {
            Self::empty()
        };
        base.with_extra(config.extra_stopwords.iter().map(String::as_str))
    }

    pub fn with_extra<'a, I>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.trim().to_lowercase()));
        self
    }

    /// Allocates only for words that have uppercase characters.
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().any(char::is_uppercase) {
            self.words.contains(&word.to_lowercase())
        } else {
            self.words.contains(word)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
