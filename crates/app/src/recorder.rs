//! History recorder: appends one [`HistoryRecord`] per tick.

use planthub_domain::error::PlantHubError;
use planthub_domain::history::HistoryRecord;

use crate::ports::{HistoryLog, SensorProvider};
use crate::timer::Task;

/// Pulls a fresh snapshot and appends it to the history log.
pub struct Recorder<S, H> {
    sensors: S,
    history: H,
}

impl<S, H> Recorder<S, H>
where
    S: SensorProvider,
    H: HistoryLog,
{
    pub fn new(sensors: S, history: H) -> Self {
        Self { sensors, history }
    }

    /// Record one row. Absent readings are stored as absent, never as zero.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the append fails.
    #[tracing::instrument(skip(self))]
    pub async fn record_once(&self) -> Result<HistoryRecord, PlantHubError> {
        let snapshot = self.sensors.read_all().await;
        let record = HistoryRecord::from_snapshot(snapshot.taken_at, &snapshot);
        self.history.append(record.clone()).await?;
        tracing::debug!(recorded_at = %record.recorded_at, "history row appended");
        Ok(record)
    }
}

impl<S, H> Task for Recorder<S, H>
where
    S: SensorProvider + 'static,
    H: HistoryLog + 'static,
{
    fn name(&self) -> &'static str {
        "history-recorder"
    }

    async fn run(&mut self) -> Result<(), PlantHubError> {
        self.record_once().await.map(|_| ())
    }
}
