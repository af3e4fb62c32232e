//! Structured filtering over stored records.

use crate::store::StringRecord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Lower length bound exceeds the upper bound.
    #[error("min_length ({min}) cannot be greater than max_length ({max})")]
    InvalidRange {
        /// Requested `min_length`.
        min: usize,
        /// Requested `max_length`.
        max: usize,
    },
}

/// Optional predicates combined with logical AND. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FilterCriteria {
    /// Match only palindromes (`true`) or only non-palindromes (`false`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    /// Inclusive lower bound on `length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Inclusive upper bound on `length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Exact number of words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Character that must appear in the stored value (case-sensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<char>,
}

impl FilterCriteria {
    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reject contradictory length bounds.
    pub fn validate(&self) -> Result<(), FilterError> {
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(FilterError::InvalidRange { min, max }),
            _ => Ok(()),
        }
    }

    /// Evaluate every supplied predicate against `record`.
    pub fn matches(&self, record: &StringRecord) -> bool {
        let props = &record.properties;
        if self.is_palindrome.is_some_and(|want| props.is_palindrome != want) {
            return false;
        }
        if self.min_length.is_some_and(|min| props.length < min) {
            return false;
        }
        if self.max_length.is_some_and(|max| props.length > max) {
            return false;
        }
        if self.word_count.is_some_and(|count| props.word_count != count) {
            return false;
        }
        if let Some(ch) = self.contains_character {
            if !record.value.contains(ch) {
                return false;
            }
        }
        true
    }
}

/// Keep the records matching `criteria`, preserving their order.
///
/// Criteria are validated before any record is inspected.
pub fn apply_filters(
    records: Vec<StringRecord>,
    criteria: &FilterCriteria,
) -> Result<Vec<StringRecord>, FilterError> {
    criteria.validate()?;
    Ok(records
        .into_iter()
        .filter(|record| criteria.matches(record))
        .collect())
}
