//! History port: append-only environmental log.

use std::future::Future;
use std::sync::Arc;

use planthub_domain::error::PlantHubError;
use planthub_domain::history::HistoryRecord;
use planthub_domain::time::Timestamp;

/// Append-only store of [`HistoryRecord`]s.
pub trait HistoryLog: Send + Sync {
    /// Persist one row.
    fn append(&self, record: HistoryRecord)
    -> impl Future<Output = Result<(), PlantHubError>> + Send;

    /// The last `limit` rows, oldest first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, PlantHubError>> + Send;

    /// Rows recorded in the half-open range `[from, to)`, oldest first.
    fn between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, PlantHubError>> + Send;
}

impl<T: HistoryLog> HistoryLog for Arc<T> {
    fn append(
        &self,
        record: HistoryRecord,
    ) -> impl Future<Output = Result<(), PlantHubError>> + Send {
        (**self).append(record)
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, PlantHubError>> + Send {
        (**self).recent(limit)
    }

    fn between(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> impl Future<Output = Result<Vec<HistoryRecord>, PlantHubError>> + Send {
        (**self).between(from, to)
    }
}
