//! Action records: the append-only audit trail of actuator commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::actuator::{ActuatorKind, StripCommand};
use crate::time::Timestamp;

/// What produced an [`ActionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Automatic irrigation.
    Pump,
    /// Automatic plain grow light.
    Light,
    /// Automatic LED strip.
    Strip,
    /// Operator-issued command through the manual control path.
    Manual,
}

impl ActionKind {
    /// Stable lowercase name, used as the stored value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pump => "pump",
            Self::Light => "light",
            Self::Strip => "strip",
            Self::Manual => "manual",
        }
    }
}

impl From<ActuatorKind> for ActionKind {
    fn from(kind: ActuatorKind) -> Self {
        match kind {
            ActuatorKind::Pump => Self::Pump,
            ActuatorKind::Light => Self::Light,
            ActuatorKind::Strip => Self::Strip,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`ActionKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action kind {0:?}")]
pub struct UnknownActionKind(pub String);

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pump" => Ok(Self::Pump),
            "light" => Ok(Self::Light),
            "strip" => Ok(Self::Strip),
            "manual" => Ok(Self::Manual),
            other => Err(UnknownActionKind(other.to_string())),
        }
    }
}

/// One audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub recorded_at: Timestamp,
    pub kind: ActionKind,
    /// Human-readable parameters, e.g. `3s` or `white,128,10s`.
    pub detail: String,
}

impl ActionRecord {
    /// Create a record.
    pub fn new(recorded_at: Timestamp, kind: ActionKind, detail: impl Into<String>) -> Self {
        Self {
            recorded_at,
            kind,
            detail: detail.into(),
        }
    }

    /// Record of an automatic pump pulse.
    #[must_use]
    pub fn pump(recorded_at: Timestamp, seconds: u32) -> Self {
        Self::new(recorded_at, ActionKind::Pump, format!("{seconds}s"))
    }

    /// Record of an automatic plain-light activation.
    #[must_use]
    pub fn light(recorded_at: Timestamp, brightness_pct: u8) -> Self {
        Self::new(recorded_at, ActionKind::Light, format!("{brightness_pct}%"))
    }

    /// Record of an automatic LED strip activation.
    #[must_use]
    pub fn strip(recorded_at: Timestamp, command: &StripCommand) -> Self {
        Self::new(
            recorded_at,
            ActionKind::Strip,
            format!(
                "{},{},{}s",
                command.mode, command.brightness, command.duration_s
            ),
        )
    }
}
