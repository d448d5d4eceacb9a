//! Schedule port: lets settings changes retime the history recorder.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Restarts the recorder timer with a new interval.
pub trait RecorderSchedule: Send + Sync {
    /// Replace the recorder interval. Returns `false` when the recorder is
    /// no longer running (e.g. after shutdown) and nothing was restarted.
    fn reschedule(&self, interval: Duration) -> impl Future<Output = bool> + Send;
}

impl<T: RecorderSchedule> RecorderSchedule for Arc<T> {
    fn reschedule(&self, interval: Duration) -> impl Future<Output = bool> + Send {
        (**self).reschedule(interval)
    }
}
