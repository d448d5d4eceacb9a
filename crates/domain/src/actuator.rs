//! Actuators (water pump, plain grow light, addressable LED strip) and the
//! safety limits applied to every command.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Shortest pump pulse, seconds.
pub const PUMP_PULSE_MIN_S: i64 = 1;
/// Longest pump pulse, seconds.
pub const PUMP_PULSE_MAX_S: i64 = 30;
/// Longest LED strip activation, seconds.
pub const STRIP_DURATION_MAX_S: i64 = 60;

/// Actuator class. Also the key of the controller's cooldown map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorKind {
    Pump,
    Light,
    Strip,
}

impl ActuatorKind {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pump => "pump",
            Self::Light => "light",
            Self::Strip => "strip",
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour preset for the LED strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripMode {
    #[default]
    White,
    Warm,
    /// Red + blue mix favoured for plant growth.
    Grow,
    Red,
    Green,
    Blue,
}

impl StripMode {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Warm => "warm",
            Self::Grow => "grow",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    /// Full-intensity RGB triple for this preset.
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::White => (255, 255, 255),
            Self::Warm => (255, 180, 100),
            Self::Grow => (255, 0, 200),
            Self::Red => (255, 0, 0),
            Self::Green => (0, 255, 0),
            Self::Blue => (0, 0, 255),
        }
    }
}

impl fmt::Display for StripMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StripMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Self::White),
            "warm" => Ok(Self::Warm),
            "grow" => Ok(Self::Grow),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            _ => Err(ValidationError::UnknownStripMode(s.to_string())),
        }
    }
}

/// A single LED strip activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripCommand {
    pub mode: StripMode,
    /// Strip brightness, `0..=255`.
    pub brightness: u8,
    /// How long the strip stays lit, seconds.
    pub duration_s: u32,
}

impl StripCommand {
    /// Build a command with brightness and duration clamped into their safe ranges.
    #[must_use]
    pub fn clamped(mode: StripMode, brightness: i64, duration_s: i64) -> Self {
        Self {
            mode,
            brightness: clamp_strip_brightness(brightness),
            duration_s: clamp_strip_duration(duration_s),
        }
    }
}

/// Clamp a pump pulse into `[1, 30]` seconds.
#[must_use]
pub fn clamp_pump_seconds(seconds: i64) -> u32 {
    clamp_to_u32(seconds, PUMP_PULSE_MIN_S, PUMP_PULSE_MAX_S)
}

/// Clamp a plain-light brightness into `[0, 100]` percent.
#[must_use]
pub fn clamp_percent(value: i64) -> u8 {
    u8::try_from(value.clamp(0, 100)).unwrap_or(100)
}

/// Clamp an LED strip brightness into `[0, 255]`.
#[must_use]
pub fn clamp_strip_brightness(value: i64) -> u8 {
    u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
}

/// Clamp an LED strip duration into `[1, 60]` seconds.
#[must_use]
pub fn clamp_strip_duration(seconds: i64) -> u32 {
    clamp_to_u32(seconds, 1, STRIP_DURATION_MAX_S)
}

fn clamp_to_u32(value: i64, min: i64, max: i64) -> u32 {
    u32::try_from(value.clamp(min, max)).unwrap_or(1)
}
