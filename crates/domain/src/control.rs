//! Manual control requests issued by an operator.
//!
//! Every numeric parameter passes through the same safety clamps as the
//! automatic controller before it reaches an actuator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actuator::{
    StripCommand, StripMode, clamp_percent, clamp_pump_seconds, clamp_strip_brightness,
    clamp_strip_duration,
};

const DEFAULT_PUMP_S: i64 = 3;
const DEFAULT_BRIGHTNESS: i64 = 70;
const DEFAULT_STRIP_BRIGHTNESS: i64 = 128;
const DEFAULT_STRIP_DURATION_S: i64 = 10;

/// Operator request. Each `Option<bool>` switch is either "leave alone"
/// (`None`), "on" or "off".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualControl {
    pub pump: Option<bool>,
    pub pump_duration: Option<i64>,
    pub light: Option<bool>,
    pub brightness: Option<i64>,
    #[serde(alias = "ws_enable")]
    pub strip: Option<bool>,
    #[serde(alias = "ws_mode")]
    pub strip_mode: Option<StripMode>,
    #[serde(alias = "ws_brightness")]
    pub strip_brightness: Option<i64>,
    #[serde(alias = "ws_duration")]
    pub strip_duration: Option<i64>,
}

/// A single concrete actuator command derived from a [`ManualControl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualCommand {
    PumpPulse(u32),
    PumpOff,
    LightOn(u8),
    LightOff,
    StripOn(StripCommand),
    StripOff,
}

impl fmt::Display for ManualCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PumpPulse(seconds) => write!(f, "pump:on({seconds}s)"),
            Self::PumpOff => f.write_str("pump:off"),
            Self::LightOn(pct) => write!(f, "light:on({pct}%)"),
            Self::LightOff => f.write_str("light:off"),
            Self::StripOn(cmd) => write!(
                f,
                "strip:on({},{},{}s)",
                cmd.mode, cmd.brightness, cmd.duration_s
            ),
            Self::StripOff => f.write_str("strip:off"),
        }
    }
}

impl ManualControl {
    /// Copy with every present numeric parameter clamped into its safe range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            pump: self.pump,
            pump_duration: self
                .pump_duration
                .map(|s| i64::from(clamp_pump_seconds(s))),
            light: self.light,
            brightness: self.brightness.map(|b| i64::from(clamp_percent(b))),
            strip: self.strip,
            strip_mode: self.strip_mode,
            strip_brightness: self
                .strip_brightness
                .map(|b| i64::from(clamp_strip_brightness(b))),
            strip_duration: self
                .strip_duration
                .map(|s| i64::from(clamp_strip_duration(s))),
        }
    }

    /// Commands in execution order: pump, light, strip.
    #[must_use]
    pub fn commands(&self) -> Vec<ManualCommand> {
        let mut commands = Vec::with_capacity(3);
        match self.pump {
            Some(true) => commands.push(ManualCommand::PumpPulse(clamp_pump_seconds(
                self.pump_duration.unwrap_or(DEFAULT_PUMP_S),
            ))),
            Some(false) => commands.push(ManualCommand::PumpOff),
            None => {}
        }
        match self.light {
            Some(true) => commands.push(ManualCommand::LightOn(clamp_percent(
                self.brightness.unwrap_or(DEFAULT_BRIGHTNESS),
            ))),
            Some(false) => commands.push(ManualCommand::LightOff),
            None => {}
        }
        match self.strip {
            Some(true) => commands.push(ManualCommand::StripOn(StripCommand::clamped(
                self.strip_mode.unwrap_or_default(),
                self.strip_brightness.unwrap_or(DEFAULT_STRIP_BRIGHTNESS),
                self.strip_duration.unwrap_or(DEFAULT_STRIP_DURATION_S),
            ))),
            Some(false) => commands.push(ManualCommand::StripOff),
            None => {}
        }
        commands
    }
}

/// Join commands into the audit detail string, e.g. `pump:on(5s);light:off`.
#[must_use]
pub fn detail(commands: &[ManualCommand]) -> String {
    commands
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(";")
}
