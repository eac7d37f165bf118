//! Ingestion outcome report.

use crate::model::error::DocumentError;

/// One source that was excluded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestFailure {
    /// Origin label of the rejected source.
    pub origin: String,
    /// Why the source was rejected.
    pub error: DocumentError,
}

/// Batch ingestion result returned alongside the store.
///
/// Every input source appears exactly once: either in `loaded` (by slug) or
/// in `failures`. Both lists keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub loaded: Vec<String>,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    /// Returns `true` when no source was rejected.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of sources processed.
    pub fn total(&self) -> usize {
        self.loaded.len() + self.failures.len()
    }

    /// Returns the failure recorded for `origin`, if any.
    pub fn failure_for(&self, origin: &str) -> Option<&DocumentError> {
        self.failures
            .iter()
            .find(|failure| failure.origin == origin)
            .map(|failure| &failure.error)
    }
}
