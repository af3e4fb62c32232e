//! Outcome and error types for the string service.

use crate::{
    filters::{FilterCriteria, FilterError},
    interpreter::InterpretError,
    store::{StoreError, StringRecord},
};
use thiserror::Error;

/// Errors surfaced by [`super::StringApi`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Structured filter criteria were inconsistent.
    #[error(transparent)]
    Filter(#[from] FilterError),
    /// A natural-language query could not be turned into criteria.
    #[error(transparent)]
    Interpret(#[from] InterpretError),
    /// A natural-language query was empty after trimming.
    #[error("Query must not be empty")]
    EmptyQuery,
    /// A natural-language query exceeded the configured length.
    #[error("Query is {actual} characters long; the limit is {max}")]
    QueryTooLong {
        /// Configured limit.
        max: usize,
        /// Length of the rejected query.
        actual: usize,
    },
}

/// Result of a structured list query.
#[derive(Debug, Clone)]
pub struct ListOutcome {
    /// Matching records in storage order.
    pub records: Vec<StringRecord>,
    /// Number of matching records.
    pub count: usize,
    /// Criteria that were applied.
    pub criteria: FilterCriteria,
}

/// Result of a natural-language query.
#[derive(Debug, Clone)]
pub struct NaturalLanguageOutcome {
    /// Matching records in storage order.
    pub records: Vec<StringRecord>,
    /// Number of matching records.
    pub count: usize,
    /// Query text exactly as supplied.
    pub original_query: String,
    /// Criteria derived from the query.
    pub parsed_criteria: FilterCriteria,
}

/// Storage summary reported by health endpoints.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    /// Backing storage label (`memory` or `file:<path>`).
    pub storage: String,
    /// Number of records currently stored.
    pub records: usize,
}
