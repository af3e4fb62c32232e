//! Record storage: one record per distinct string, keyed by its content hash.
//!
//! The [`RecordStore`] trait is the only seam the service depends on. Two implementations ship:
//! [`MemoryRecordStore`] for ephemeral use and tests, and [`FileRecordStore`] which writes the
//! whole collection to a JSON snapshot after each mutation.

mod file;
mod memory;
mod table;
pub mod types;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use types::{StoreError, StringRecord};

use crate::analysis::{StringProperties, compute_content_hash};
use async_trait::async_trait;

/// Storage backend holding the string records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record unless one with the same hash already exists.
    ///
    /// The existence check and the write happen under one lock; two concurrent inserts of the
    /// same value produce exactly one success and one [`StoreError::Conflict`].
    async fn insert_if_absent(
        &self,
        value: String,
        properties: StringProperties,
        hash: String,
    ) -> Result<StringRecord, StoreError>;

    /// Fetch the record stored under `hash`.
    async fn get_by_hash(&self, hash: &str) -> Result<StringRecord, StoreError>;

    /// Fetch the record whose value is exactly `value`.
    async fn get_by_value(&self, value: &str) -> Result<StringRecord, StoreError> {
        self.get_by_hash(&compute_content_hash(value)).await
    }

    /// Remove the record whose value is exactly `value`.
    async fn delete_by_value(&self, value: &str) -> Result<(), StoreError>;

    /// Every stored record in insertion order.
    async fn list_all(&self) -> Result<Vec<StringRecord>, StoreError>;

    /// Short label describing the backing storage, surfaced in health output.
    fn describe(&self) -> String;
}
