//! String analysis: derived properties and the content hash used as record identifier.
//!
//! Everything here is pure. [`analyze`] never fails, including for the empty string, and the
//! same input always yields the same [`StringProperties`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};

/// Properties derived from a stored string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StringProperties {
    /// Number of characters (Unicode scalar values).
    pub length: usize,
    /// Whether the lower-cased string equals its own reverse.
    pub is_palindrome: bool,
    /// Number of distinct characters in the original string.
    pub unique_characters: usize,
    /// Number of whitespace-delimited tokens.
    pub word_count: usize,
    /// SHA-256 digest of the UTF-8 bytes, lowercase hex.
    pub sha256_hash: String,
    /// Occurrence count for every character, whitespace included.
    pub character_frequency_map: BTreeMap<String, usize>,
}

/// Compute every derived property for `value`.
pub fn analyze(value: &str) -> StringProperties {
    StringProperties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: value.chars().collect::<HashSet<_>>().len(),
        word_count: word_count(value),
        sha256_hash: compute_content_hash(value),
        character_frequency_map: character_frequencies(value),
    }
}

/// Compute the SHA-256 content hash of `value` as lowercase hex.
pub fn compute_content_hash(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Case-insensitive, literal palindrome check. Whitespace and punctuation take part.
fn is_palindrome(value: &str) -> bool {
    let lowered: Vec<char> = value.to_lowercase().chars().collect();
    lowered.iter().eq(lowered.iter().rev())
}

/// Tokens separated by runs of whitespace. The ASCII information separators (U+001C to U+001F)
/// also split words.
fn word_count(value: &str) -> usize {
    value
        .split(is_word_separator)
        .filter(|word| !word.is_empty())
        .count()
}

fn is_word_separator(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\u{1c}'..='\u{1f}')
}

fn character_frequencies(value: &str) -> BTreeMap<String, usize> {
    let mut frequencies = BTreeMap::new();
    for ch in value.chars() {
        *frequencies.entry(ch.to_string()).or_insert(0) += 1;
    }
    frequencies
}
