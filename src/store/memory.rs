//! In-process record store.

use super::{
    RecordStore,
    table::RecordTable,
    types::{StoreError, StringRecord},
};
use crate::analysis::{StringProperties, compute_content_hash};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Record store kept entirely in memory; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: RwLock<RecordTable>,
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_if_absent(
        &self,
        value: String,
        properties: StringProperties,
        hash: String,
    ) -> Result<StringRecord, StoreError> {
        let mut table = self.table.write().await;
        table.insert(StringRecord::new(value, properties, hash))
    }

    async fn get_by_hash(&self, hash: &str) -> Result<StringRecord, StoreError> {
        self.table.read().await.get(hash)
    }

    async fn delete_by_value(&self, value: &str) -> Result<(), StoreError> {
        let hash = compute_content_hash(value);
        self.table.write().await.remove(&hash).map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<StringRecord>, StoreError> {
        Ok(self.table.read().await.list())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use std::sync::Arc;

    async fn insert(store: &MemoryRecordStore, value: &str) -> Result<StringRecord, StoreError> {
        let properties = analyze(value);
        let hash = properties.sha256_hash.clone();
        store
            .insert_if_absent(value.to_string(), properties, hash)
            .await
    }

    #[tokio::test]
    async fn second_insert_of_same_value_conflicts() {
        let store = MemoryRecordStore::new();
        let first = insert(&store, "abc").await.expect("first insert");
        assert_eq!(first.value, "abc");

        let err = insert(&store, "abc").await.expect_err("duplicate insert");
        assert!(matches!(err, StoreError::Conflict(hash) if hash == first.hash));
    }

    #[tokio::test]
    async fn lookup_by_value_and_hash_agree() {
        let store = MemoryRecordStore::new();
        let record = insert(&store, "Level").await.expect("insert");

        let by_value = store.get_by_value("Level").await.expect("by value");
        let by_hash = store.get_by_hash(&record.hash).await.expect("by hash");
        assert_eq!(by_value, record);
        assert_eq!(by_hash, record);

        let err = store.get_by_value("level").await.expect_err("case differs");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = MemoryRecordStore::new();
        insert(&store, "gone").await.expect("insert");

        store.delete_by_value("gone").await.expect("first delete");
        let err = store
            .delete_by_value("gone")
            .await
            .expect_err("second delete");
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.list_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_value_reports_not_found() {
        let store = MemoryRecordStore::new();
        let err = store.delete_by_value("never").await.expect_err("missing");
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn concurrent_inserts_have_single_winner() {
        let store = Arc::new(MemoryRecordStore::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move { insert(&store, "race").await }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.expect("task joined") {
                Ok(_) => successes += 1,
                Err(StoreError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(store.list_all().await.expect("list").len(), 1);
    }
}
