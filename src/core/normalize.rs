//! Text normalization: raw text to stemmed token frequencies.
//!
//! The normalizer strips punctuation, lower-cases, tokenizes on word
//! boundaries, drops boundary tokens (chunk edges often slice words or
//! context), filters noise tokens, and reduces survivors to their
//! Porter-style stem. The stopword set is built once at process start
//! and passed by reference into every invocation.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

use crate::core::types::FreqMap;

/// Characters that are neither word characters nor whitespace
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("static pattern compiles"));

/// English stopwords, the usual NLP list
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
    "for", "with", "about", "against", "between", "into", "through", "during", "before",
    "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
    "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
    "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y",
];

/// Hand-curated additions observed to pollute corpus frequency maps
const BANNED_WORDS: &[&str] = &[
    "enough", "get", "got", "gotten", "far", "might", "ought", "must", "shall", "since",
    "also", "theirselves", "could", "need", "done", "would", "may", "near", "us",
    "wont", "dont", "cant", "im", "ive", "youre", "youve", "theyre", "isnt",
    "wasnt", "arent", "didnt", "doesnt", "hasnt", "havent", "wouldnt", "couldnt",
    "shouldnt",
];

/// Process-wide stopword/banned-word set.
///
/// Union of the English stopword list, the curated banned-word list, and
/// single-character punctuation. Immutable after initialization.
pub struct StopSet {
    words: HashSet<&'static str>,
}

impl StopSet {
    fn build() -> Self {
        let mut words: HashSet<&'static str> =
            ENGLISH_STOPWORDS.iter().copied().collect();
        words.extend(BANNED_WORDS.iter().copied());

        Self { words }
    }

    /// Membership test, including single-character punctuation symbols
    pub fn contains(&self, token: &str) -> bool {
        if self.words.contains(token) {
            return true;
        }

        let mut chars = token.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The stopword set, built once at first use
pub static STOP_SET: Lazy<StopSet> = Lazy::new(StopSet::build);

/// English Snowball stemmer, built once at first use
static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Reject OCR artifacts / noise tokens such as "aaaa"
fn has_triple_repeat(token: &str) -> bool {
    let mut run = 0;
    let mut prev = None;

    for c in token.chars() {
        if Some(c) == prev {
            run += 1;
            if run >= 3 {
                return true;
            }
        } else {
            prev = Some(c);
            run = 1;
        }
    }

    false
}

/// Map raw text to stemmed token occurrence counts.
///
/// Returns an empty map when fewer than 4 tokens survive cleaning:
/// the first and last two tokens are always dropped as boundary noise,
/// so shorter inputs have no content left. Never panics.
pub fn token_frequencies(text: &str, stops: &StopSet) -> FreqMap {
    let cleaned = NON_WORD.replace_all(text, "").to_lowercase();
    let tokens: Vec<&str> = cleaned.unicode_words().collect();

    if tokens.len() < 4 {
        tracing::debug!(
            "Text too short to normalize ({} tokens), returning empty map",
            tokens.len()
        );
        return FreqMap::new();
    }

    let mut freq = FreqMap::new();

    // Exclude the first token and the last two
    for &token in &tokens[1..tokens.len() - 2] {
        if !token.chars().all(char::is_alphabetic) {
            continue;
        }
        if stops.contains(token) || has_triple_repeat(token) {
            continue;
        }

        let stem = STEMMER.stem(token).into_owned();
        *freq.entry(stem).or_insert(0) += 1;
    }

    freq
}
