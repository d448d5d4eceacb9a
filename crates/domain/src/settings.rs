//! Runtime settings: the operator-editable part of the configuration that is
//! persisted across restarts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auto_control::{AutoControlConfig, AutoControlPatch};
use crate::error::ValidationError;

/// Default history logging interval, minutes.
pub const DEFAULT_LOG_INTERVAL_MIN: u32 = 30;

/// Persisted runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minutes between two history rows.
    pub log_interval_min: u32,
    pub auto_control: AutoControlConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_interval_min: DEFAULT_LOG_INTERVAL_MIN,
            auto_control: AutoControlConfig::default(),
        }
    }
}

impl Settings {
    /// Interval between two history rows. Never shorter than one minute.
    #[must_use]
    pub fn recorder_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.log_interval_min.max(1)) * 60)
    }

    /// Merge `patch` over these settings.
    ///
    /// # Errors
    ///
    /// Propagates [`ValidationError`] from the auto-control merge.
    pub fn apply(&self, patch: &SettingsPatch) -> Result<Self, ValidationError> {
        let log_interval_min = patch.log_interval_min.map_or(self.log_interval_min, |m| {
            u32::try_from(m.max(1)).unwrap_or(u32::MAX)
        });
        let auto_control = match &patch.auto_control {
            Some(patch) => self.auto_control.apply(patch)?,
            None => self.auto_control.clone(),
        };
        Ok(Self {
            log_interval_min,
            auto_control,
        })
    }
}

/// Partial update of [`Settings`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub log_interval_min: Option<i64>,
    pub auto_control: Option<AutoControlPatch>,
}
