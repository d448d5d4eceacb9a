//! Settings service: reads and updates the operator-editable settings.

use std::sync::Arc;

use planthub_domain::auto_control::AutoControlConfig;
use planthub_domain::error::PlantHubError;
use planthub_domain::settings::{Settings, SettingsPatch};
use tokio::sync::Mutex;

use crate::config_cell::ConfigCell;
use crate::ports::{RecorderSchedule, SettingsStore};

/// Applies settings patches to the live configuration, the recorder schedule
/// and durable storage, in that order.
pub struct SettingsService<S, R> {
    store: S,
    schedule: R,
    config: Arc<ConfigCell<AutoControlConfig>>,
    current: Mutex<Settings>,
}

impl<S: SettingsStore, R: RecorderSchedule> SettingsService<S, R> {
    /// `initial` must be the settings the timers and `config` were built from.
    pub fn new(
        store: S,
        schedule: R,
        config: Arc<ConfigCell<AutoControlConfig>>,
        initial: Settings,
    ) -> Self {
        Self {
            store,
            schedule,
            config,
            current: Mutex::new(initial),
        }
    }

    pub async fn get(&self) -> Settings {
        self.current.lock().await.clone()
    }

    /// Merge `patch` into the current settings.
    ///
    /// The new auto-control config is visible to the next controller tick as
    /// soon as this call publishes it, and a changed logging interval
    /// restarts the recorder before the settings are persisted. Updates are
    /// serialized up to and including the save, so the stored settings always
    /// match the last update applied in memory.
    ///
    /// # Errors
    ///
    /// Returns [`PlantHubError::Validation`] for a rejected patch (nothing is
    /// changed), or a storage error when persisting fails (the in-memory
    /// update has already taken effect).
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, patch: SettingsPatch) -> Result<Settings, PlantHubError> {
        let mut current = self.current.lock().await;
        let next = current.apply(&patch)?;

        if next.auto_control != current.auto_control {
            self.config.replace(next.auto_control.clone());
            tracing::info!("auto-control settings replaced");
        }
        if next.log_interval_min != current.log_interval_min {
            let rescheduled = self.schedule.reschedule(next.recorder_interval()).await;
            if !rescheduled {
                tracing::warn!("recorder is not running, new interval not applied");
            }
        }
        *current = next.clone();

        // still holding the lock: saves must land in the order updates applied
        self.store.save(&next).await?;
        Ok(next)
    }
}
