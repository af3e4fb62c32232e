//! Heuristic translation of plain-English queries into [`FilterCriteria`].
//!
//! This is keyword matching over a fixed vocabulary, not a parser. Rules run in a fixed order
//! and a later rule overwrites what an earlier rule set for the same criterion, so
//! `"letter x ... contain y"` ends up filtering on `y`.

use crate::filters::FilterCriteria;
use regex::Regex;
use std::{num::IntErrorKind, sync::LazyLock};
use thiserror::Error;

static LONGER_THAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"longer than\s+([0-9]+)\s+characters?").expect("valid regex"));
static SHORTER_THAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"shorter than\s+([0-9]+)\s+characters?").expect("valid regex"));
static LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"letter\s+([a-z])").expect("valid regex"));
static CONTAINS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"contain(?:ing)?\s+([a-z])").expect("valid regex"));

/// Phrases recognized by [`interpret`], with the criterion each one sets.
pub const VOCABULARY: [(&str, &str); 7] = [
    ("longer than <N> characters", "min_length = N + 1"),
    ("shorter than <N> characters", "max_length = max(N - 1, 0)"),
    ("palindrome / palindromic", "is_palindrome = true"),
    ("single word / one word", "word_count = 1"),
    ("first vowel", "contains_character = a"),
    ("letter <c>", "contains_character = c"),
    ("contain / containing <c>", "contains_character = c"),
];

/// Errors produced while interpreting a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// No known phrase occurred in the query.
    #[error("Unable to parse natural language query")]
    Unparseable,
    /// The phrases found imply an empty length range.
    #[error("Parsed filters conflict: min_length ({min}) > max_length ({max})")]
    Conflict {
        /// Derived `min_length`.
        min: usize,
        /// Derived `max_length`.
        max: usize,
    },
}

/// Interpret `query` as a set of filter criteria.
pub fn interpret(query: &str) -> Result<FilterCriteria, InterpretError> {
    let normalized = query.trim().to_lowercase();
    let mut criteria = FilterCriteria::default();

    if let Some(n) = capture_number(&LONGER_THAN, &normalized) {
        criteria.min_length = Some(n.saturating_add(1));
    }
    if let Some(n) = capture_number(&SHORTER_THAN, &normalized) {
        criteria.max_length = Some(n.saturating_sub(1));
    }
    if normalized.contains("palindrom") {
        criteria.is_palindrome = Some(true);
    }
    if normalized.contains("single word") || normalized.contains("one word") {
        criteria.word_count = Some(1);
    }
    if normalized.contains("first vowel") {
        criteria.contains_character = Some('a');
    }
    if let Some(ch) = capture_letter(&LETTER, &normalized) {
        criteria.contains_character = Some(ch);
    }
    if let Some(ch) = capture_letter(&CONTAINS, &normalized) {
        criteria.contains_character = Some(ch);
    }

    if criteria.is_empty() {
        return Err(InterpretError::Unparseable);
    }
    if let (Some(min), Some(max)) = (criteria.min_length, criteria.max_length) {
        if min > max {
            return Err(InterpretError::Conflict { min, max });
        }
    }

    tracing::debug!(query, ?criteria, "Interpreted natural language query");
    Ok(criteria)
}

/// Only ASCII digits are captured; values too large for `usize` saturate.
fn capture_number(pattern: &Regex, text: &str) -> Option<usize> {
    let digits = pattern.captures(text)?.get(1)?.as_str();
    match digits.parse::<usize>() {
        Ok(n) => Some(n),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    }
}

fn capture_letter(pattern: &Regex, text: &str) -> Option<char> {
    pattern.captures(text)?.get(1)?.as_str().chars().next()
}
