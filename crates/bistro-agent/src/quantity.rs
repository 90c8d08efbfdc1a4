//! Rule-based party-size extraction.
//!
//! Digits take precedence over number words. The word table starts at two:
//! "un"/"une"/"a"/"an" are indefinite articles far more often than
//! quantities ("une table"), so they are never read as one person.

use std::sync::LazyLock;

use regex::Regex;

/// A maximal run of ASCII digits bounded by word boundaries.
///
/// `\d` would also match non-ASCII digits that `u32::from_str` rejects.
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([0-9]+)\b").unwrap());

/// Number words, scanned in this order; the first one present wins.
const NUMBER_WORDS: &[(&str, u32)] = &[
    ("deux", 2),
    ("trois", 3),
    ("quatre", 4),
    ("cinq", 5),
    ("six", 6),
    ("sept", 7),
    ("huit", 8),
    ("neuf", 9),
    ("dix", 10),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

/// Best-effort party-size heuristic; not a grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantityExtractor;

impl QuantityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a positive party size, or `None` if the text has none.
    ///
    /// A digit token is authoritative: when one is present the word table
    /// is not consulted, and a zero or out-of-range token yields `None`.
    pub fn extract(&self, text: &str) -> Option<u32> {
        let lower = text.to_lowercase();

        if let Some(caps) = RE_DIGITS.captures(&lower) {
            return caps[1].parse::<u32>().ok().filter(|n| *n > 0);
        }

        let tokens: Vec<&str> = lower
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .collect();

        NUMBER_WORDS
            .iter()
            .find(|(word, _)| tokens.contains(word))
            .map(|(_, n)| *n)
    }
}
