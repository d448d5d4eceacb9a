//! Action log port: audit trail of every actuator activation.

use std::future::Future;
use std::sync::Arc;

use planthub_domain::action::ActionRecord;
use planthub_domain::error::PlantHubError;

/// Append-only store of [`ActionRecord`]s.
pub trait ActionLog: Send + Sync {
    fn append(&self, record: ActionRecord)
    -> impl Future<Output = Result<(), PlantHubError>> + Send;

    /// The last `limit` records, oldest first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActionRecord>, PlantHubError>> + Send;
}

impl<T: ActionLog> ActionLog for Arc<T> {
    fn append(
        &self,
        record: ActionRecord,
    ) -> impl Future<Output = Result<(), PlantHubError>> + Send {
        (**self).append(record)
    }

    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ActionRecord>, PlantHubError>> + Send {
        (**self).recent(limit)
    }
}
