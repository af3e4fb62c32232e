//! Insertion-ordered record table shared by the store implementations.

use super::types::{StoreError, StringRecord};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct RecordTable {
    records: HashMap<String, StringRecord>,
    order: Vec<String>,
}

impl RecordTable {
    /// Rebuild a table from records listed in insertion order. Later duplicates are dropped.
    pub(crate) fn from_records(records: Vec<StringRecord>) -> Self {
        let mut table = Self::default();
        for record in records {
            if table.records.contains_key(&record.hash) {
                tracing::warn!(id = %record.hash, "Skipping duplicate record in snapshot");
                continue;
            }
            table.order.push(record.hash.clone());
            table.records.insert(record.hash.clone(), record);
        }
        table
    }

    pub(crate) fn contains(&self, hash: &str) -> bool {
        self.records.contains_key(hash)
    }

    pub(crate) fn insert(&mut self, record: StringRecord) -> Result<StringRecord, StoreError> {
        if self.contains(&record.hash) {
            return Err(StoreError::Conflict(record.hash));
        }
        self.order.push(record.hash.clone());
        self.records.insert(record.hash.clone(), record.clone());
        Ok(record)
    }

    pub(crate) fn get(&self, hash: &str) -> Result<StringRecord, StoreError> {
        self.records
            .get(hash)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(hash.to_string()))
    }

    pub(crate) fn remove(&mut self, hash: &str) -> Result<StringRecord, StoreError> {
        let record = self
            .records
            .remove(hash)
            .ok_or_else(|| StoreError::NotFound(hash.to_string()))?;
        self.order.retain(|existing| existing != hash);
        Ok(record)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn list(&self) -> Vec<StringRecord> {
        self.order
            .iter()
            .filter_map(|hash| self.records.get(hash).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    fn record(value: &str) -> StringRecord {
        let properties = analyze(value);
        let hash = properties.sha256_hash.clone();
        StringRecord::new(value.to_string(), properties, hash)
    }

    #[test]
    fn list_preserves_insertion_order_after_removal() {
        let mut table = RecordTable::default();
        for value in ["zeta", "alpha", "mid"] {
            table.insert(record(value)).expect("insert");
        }
        table.remove(&record("alpha").hash).expect("remove");
        table.insert(record("alpha")).expect("reinsert");

        let values: Vec<_> = table.list().into_iter().map(|r| r.value).collect();
        assert_eq!(values, vec!["zeta", "mid", "alpha"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn from_records_drops_duplicates() {
        let table = RecordTable::from_records(vec![record("a"), record("b"), record("a")]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_rejects_existing_hash() {
        let mut table = RecordTable::default();
        table.insert(record("abc")).expect("first insert");
        let err = table.insert(record("abc")).expect_err("duplicate");
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
