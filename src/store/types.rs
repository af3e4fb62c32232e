//! Record type and storage errors.

use crate::analysis::StringProperties;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

/// Errors returned by [`super::RecordStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same content hash already exists.
    #[error("String already exists in the system (id {0})")]
    Conflict(String),
    /// No record matched the requested hash.
    #[error("String does not exist in the system (id {0})")]
    NotFound(String),
    /// Reading or writing the snapshot file failed.
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        /// Snapshot path involved in the failing operation.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The snapshot file could not be encoded or decoded.
    #[error("Malformed record snapshot {path}: {source}")]
    Snapshot {
        /// Snapshot path involved in the failing operation.
        path: String,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// A stored string together with its derived properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Content hash; doubles as the public identifier.
    pub hash: String,
    /// Original string, stored verbatim.
    pub value: String,
    /// Properties computed when the record was created.
    pub properties: StringProperties,
    /// Insertion time (UTC).
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl StringRecord {
    pub(crate) fn new(value: String, properties: StringProperties, hash: String) -> Self {
        Self {
            hash,
            value,
            properties,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
