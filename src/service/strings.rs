//! String service coordinating the analyzer, record store, and filters.

use crate::{
    analysis::analyze,
    config::{Config, DEFAULT_NL_QUERY_MAX_CHARS},
    filters::{FilterCriteria, apply_filters},
    interpreter::interpret,
    metrics::{MetricsSnapshot, ServiceMetrics},
    service::types::{HealthSnapshot, ListOutcome, NaturalLanguageOutcome, ServiceError},
    store::{FileRecordStore, MemoryRecordStore, RecordStore, StoreError, StringRecord},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Owns the record store handle and metrics shared by every surface.
///
/// Construct once near process start and share through an `Arc`. Tests build one per case
/// around a fresh [`MemoryRecordStore`].
pub struct StringService {
    store: Arc<dyn RecordStore>,
    metrics: Arc<ServiceMetrics>,
    nl_query_max_chars: usize,
}

/// Operations exposed to the HTTP and MCP layers.
#[async_trait]
pub trait StringApi: Send + Sync {
    /// Analyze and store `value`; fails with a conflict when it is already stored.
    async fn create_string(&self, value: String) -> Result<StringRecord, ServiceError>;

    /// Look up the record for `value`.
    async fn get_string(&self, value: &str) -> Result<StringRecord, ServiceError>;

    /// Delete the record for `value`.
    async fn delete_string(&self, value: &str) -> Result<(), ServiceError>;

    /// List stored records matching `criteria`.
    async fn list_strings(&self, criteria: FilterCriteria) -> Result<ListOutcome, ServiceError>;

    /// Interpret `query` and list the records matching the derived criteria.
    async fn filter_by_natural_language(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageOutcome, ServiceError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl StringService {
    /// Build a service around an existing store handle.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            metrics: Arc::new(ServiceMetrics::new()),
            nl_query_max_chars: DEFAULT_NL_QUERY_MAX_CHARS,
        }
    }

    /// Service backed by an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRecordStore::new()))
    }

    /// Build the service described by `config`, opening the snapshot file when one is set.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn RecordStore> = match config.store_path.as_ref() {
            Some(path) => Arc::new(FileRecordStore::open(path.clone()).await?),
            None => {
                tracing::info!("STRING_STORE_PATH not set; records are kept in memory only");
                Arc::new(MemoryRecordStore::new())
            }
        };
        Ok(Self::new(store).with_query_limit(config.nl_query_max_chars))
    }

    /// Override the natural-language query length limit.
    pub fn with_query_limit(mut self, max_chars: usize) -> Self {
        self.nl_query_max_chars = max_chars;
        self
    }

    /// Report storage mode and current record count.
    pub async fn health(&self) -> Result<HealthSnapshot, ServiceError> {
        let records = self.store.list_all().await?.len();
        Ok(HealthSnapshot {
            storage: self.store.describe(),
            records,
        })
    }
}

#[async_trait]
impl StringApi for StringService {
    async fn create_string(&self, value: String) -> Result<StringRecord, ServiceError> {
        let properties = analyze(&value);
        let hash = properties.sha256_hash.clone();
        match self.store.insert_if_absent(value, properties, hash).await {
            Ok(record) => {
                self.metrics.record_created();
                tracing::info!(
                    id = %record.hash,
                    length = record.properties.length,
                    palindrome = record.properties.is_palindrome,
                    "String stored"
                );
                Ok(record)
            }
            Err(StoreError::Conflict(hash)) => {
                self.metrics.record_duplicate();
                tracing::debug!(id = %hash, "Rejected duplicate string");
                Err(StoreError::Conflict(hash).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn get_string(&self, value: &str) -> Result<StringRecord, ServiceError> {
        Ok(self.store.get_by_value(value).await?)
    }

    async fn delete_string(&self, value: &str) -> Result<(), ServiceError> {
        self.store.delete_by_value(value).await?;
        self.metrics.record_deleted();
        tracing::info!(length = value.chars().count(), "String deleted");
        Ok(())
    }

    async fn list_strings(&self, criteria: FilterCriteria) -> Result<ListOutcome, ServiceError> {
        // Reject bad ranges before touching storage.
        criteria.validate()?;
        let records = apply_filters(self.store.list_all().await?, &criteria)?;
        self.metrics.record_list_query();
        tracing::debug!(?criteria, matches = records.len(), "Listed strings");
        Ok(ListOutcome {
            count: records.len(),
            records,
            criteria,
        })
    }

    async fn filter_by_natural_language(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageOutcome, ServiceError> {
        if query.trim().is_empty() {
            return Err(ServiceError::EmptyQuery);
        }
        let actual = query.chars().count();
        if actual > self.nl_query_max_chars {
            return Err(ServiceError::QueryTooLong {
                max: self.nl_query_max_chars,
                actual,
            });
        }

        let parsed_criteria = interpret(query)?;
        let records = apply_filters(self.store.list_all().await?, &parsed_criteria)?;
        self.metrics.record_natural_language_query();
        tracing::debug!(
            query,
            criteria = ?parsed_criteria,
            matches = records.len(),
            "Natural language query served"
        );
        Ok(NaturalLanguageOutcome {
            count: records.len(),
            records,
            original_query: query.to_string(),
            parsed_criteria,
        })
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filters::FilterError, interpreter::InterpretError};

    async fn seeded(values: &[&str]) -> StringService {
        let service = StringService::in_memory();
        for value in values {
            service
                .create_string((*value).to_string())
                .await
                .expect("seed value");
        }
        service
    }

    #[tokio::test]
    async fn create_returns_analyzed_record() {
        let service = StringService::in_memory();
        let record = service
            .create_string("Level".into())
            .await
            .expect("created");
        assert_eq!(record.value, "Level");
        assert_eq!(record.hash, record.properties.sha256_hash);
        assert!(record.properties.is_palindrome);
        assert_eq!(service.metrics_snapshot().strings_created, 1);
    }

    #[tokio::test]
    async fn duplicate_create_conflicts_and_is_counted() {
        let service = seeded(&["abc"]).await;
        let err = service
            .create_string("abc".into())
            .await
            .expect_err("duplicate");
        assert!(matches!(err, ServiceError::Store(StoreError::Conflict(_))));

        let snapshot = service.metrics_snapshot();
        assert_eq!(snapshot.strings_created, 1);
        assert_eq!(snapshot.duplicates_rejected, 1);
    }

    #[tokio::test]
    async fn delete_then_get_reports_not_found() {
        let service = seeded(&["temp"]).await;
        service.delete_string("temp").await.expect("deleted");

        let err = service.get_string("temp").await.expect_err("gone");
        assert!(matches!(err, ServiceError::Store(StoreError::NotFound(_))));
        let err = service.delete_string("temp").await.expect_err("gone");
        assert!(matches!(err, ServiceError::Store(StoreError::NotFound(_))));
        assert_eq!(service.metrics_snapshot().strings_deleted, 1);
    }

    #[tokio::test]
    async fn list_applies_criteria_in_insertion_order() {
        let service = seeded(&["wow", "hello world", "aba", "noon"]).await;
        let outcome = service
            .list_strings(FilterCriteria {
                is_palindrome: Some(true),
                max_length: Some(3),
                ..Default::default()
            })
            .await
            .expect("listed");
        let values: Vec<_> = outcome.records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["wow", "aba"]);
        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.criteria.max_length, Some(3));
    }

    #[tokio::test]
    async fn list_rejects_inverted_range() {
        let service = seeded(&["abc"]).await;
        let err = service
            .list_strings(FilterCriteria {
                min_length: Some(5),
                max_length: Some(3),
                ..Default::default()
            })
            .await
            .expect_err("invalid range");
        assert!(matches!(
            err,
            ServiceError::Filter(FilterError::InvalidRange { min: 5, max: 3 })
        ));
        assert_eq!(service.metrics_snapshot().list_queries, 0);
    }

    #[tokio::test]
    async fn natural_language_query_reports_parsed_criteria() {
        let service = seeded(&["aba", "hello world", "racecar", "step on no pets"]).await;
        let outcome = service
            .filter_by_natural_language("all single word palindromic strings")
            .await
            .expect("interpreted");
        let values: Vec<_> = outcome.records.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["aba", "racecar"]);
        assert_eq!(outcome.original_query, "all single word palindromic strings");
        assert_eq!(outcome.parsed_criteria.word_count, Some(1));
        assert_eq!(outcome.parsed_criteria.is_palindrome, Some(true));
        assert_eq!(service.metrics_snapshot().natural_language_queries, 1);
    }

    #[tokio::test]
    async fn natural_language_errors_stay_distinct() {
        let service = StringService::in_memory();
        let err = service
            .filter_by_natural_language("xyzzy nonsense query")
            .await
            .expect_err("unparseable");
        assert!(matches!(
            err,
            ServiceError::Interpret(InterpretError::Unparseable)
        ));

        let err = service
            .filter_by_natural_language("longer than 9 characters, shorter than 2 characters")
            .await
            .expect_err("conflict");
        assert!(matches!(
            err,
            ServiceError::Interpret(InterpretError::Conflict { .. })
        ));

        let err = service
            .filter_by_natural_language("  ")
            .await
            .expect_err("empty");
        assert!(matches!(err, ServiceError::EmptyQuery));
    }

    #[tokio::test]
    async fn overlong_queries_are_rejected() {
        let service = StringService::in_memory().with_query_limit(10);
        let err = service
            .filter_by_natural_language("palindromes only please")
            .await
            .expect_err("too long");
        assert!(matches!(
            err,
            ServiceError::QueryTooLong { max: 10, actual: 23 }
        ));
    }

    #[tokio::test]
    async fn health_reports_storage_and_count() {
        let service = seeded(&["a", "b"]).await;
        let health = service.health().await.expect("health");
        assert_eq!(health.storage, "memory");
        assert_eq!(health.records, 2);
    }

    #[tokio::test]
    async fn from_config_defaults_to_memory() {
        let service = StringService::from_config(&Config::default())
            .await
            .expect("service");
        assert_eq!(service.health().await.expect("health").storage, "memory");
    }
}
