use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing service activity.
#[derive(Default)]
pub struct ServiceMetrics {
    strings_created: AtomicU64,
    strings_deleted: AtomicU64,
    duplicates_rejected: AtomicU64,
    list_queries: AtomicU64,
    natural_language_queries: AtomicU64,
}

impl ServiceMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly stored string.
    pub fn record_created(&self) {
        self.strings_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a create request rejected because the string already existed.
    pub fn record_duplicate(&self) {
        self.duplicates_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a deleted string.
    pub fn record_deleted(&self) {
        self.strings_deleted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a structured list query that completed.
    pub fn record_list_query(&self) {
        self.list_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a natural-language query that completed.
    pub fn record_natural_language_query(&self) {
        self.natural_language_queries
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            strings_created: self.strings_created.load(Ordering::Relaxed),
            strings_deleted: self.strings_deleted.load(Ordering::Relaxed),
            duplicates_rejected: self.duplicates_rejected.load(Ordering::Relaxed),
            list_queries: self.list_queries.load(Ordering::Relaxed),
            natural_language_queries: self.natural_language_queries.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of service counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    /// Strings stored since startup.
    pub strings_created: u64,
    /// Strings deleted since startup.
    pub strings_deleted: u64,
    /// Create requests rejected as duplicates.
    pub duplicates_rejected: u64,
    /// Structured list queries served.
    pub list_queries: u64,
    /// Natural-language queries served.
    pub natural_language_queries: u64,
}
