//! Record store persisted as a single JSON snapshot file.
//!
//! The full collection is rewritten after every successful mutation: the snapshot is written to
//! a sibling temp file and renamed over the original, so a crash mid-write leaves the previous
//! snapshot intact. The write lock is held across the disk write, which keeps insert-if-absent
//! atomic and means the in-memory table only changes once the snapshot is on disk.

use super::{
    RecordStore,
    table::RecordTable,
    types::{StoreError, StringRecord},
};
use crate::analysis::{StringProperties, compute_content_hash};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Record store backed by a JSON snapshot on disk.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    table: RwLock<RecordTable>,
}

impl FileRecordStore {
    /// Open the snapshot at `path`, starting empty when the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice::<Vec<StringRecord>>(&bytes).map_err(|source| {
                StoreError::Snapshot {
                    path: path.display().to_string(),
                    source,
                }
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        let table = RecordTable::from_records(records);
        tracing::info!(
            path = %path.display(),
            records = table.len(),
            "Opened record snapshot"
        );
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    async fn write_snapshot(&self, records: &[StringRecord]) -> Result<(), StoreError> {
        let label = self.path.display().to_string();
        let encoded =
            serde_json::to_vec_pretty(records).map_err(|source| StoreError::Snapshot {
                path: label.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: label.clone(),
                    source,
                })?;
        }

        let staging = staging_path(&self.path);
        tokio::fs::write(&staging, encoded)
            .await
            .map_err(|source| StoreError::Io {
                path: staging.display().to_string(),
                source,
            })?;
        if let Err(source) = tokio::fs::rename(&staging, &self.path).await {
            tracing::warn!(path = %label, error = %source, "Failed to replace snapshot");
            if let Err(cleanup) = tokio::fs::remove_file(&staging).await {
                tracing::debug!(path = %staging.display(), error = %cleanup, "Staging file left behind");
            }
            return Err(StoreError::Io {
                path: label,
                source,
            });
        }
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "strings.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn insert_if_absent(
        &self,
        value: String,
        properties: StringProperties,
        hash: String,
    ) -> Result<StringRecord, StoreError> {
        let mut table = self.table.write().await;
        if table.contains(&hash) {
            return Err(StoreError::Conflict(hash));
        }
        let record = StringRecord::new(value, properties, hash);
        let mut snapshot = table.list();
        snapshot.push(record.clone());
        self.write_snapshot(&snapshot).await?;
        table.insert(record)
    }

    async fn get_by_hash(&self, hash: &str) -> Result<StringRecord, StoreError> {
        self.table.read().await.get(hash)
    }

    async fn delete_by_value(&self, value: &str) -> Result<(), StoreError> {
        let hash = compute_content_hash(value);
        let mut table = self.table.write().await;
        if !table.contains(&hash) {
            return Err(StoreError::NotFound(hash));
        }
        let snapshot: Vec<StringRecord> = table
            .list()
            .into_iter()
            .filter(|record| record.hash != hash)
            .collect();
        self.write_snapshot(&snapshot).await?;
        table.remove(&hash).map(|_| ())
    }

    async fn list_all(&self) -> Result<Vec<StringRecord>, StoreError> {
        Ok(self.table.read().await.list())
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
