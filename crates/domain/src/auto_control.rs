//! Automatic-control policy configuration.
//!
//! The values here are what an operator edits. They are deliberately lenient
//! on input: out-of-range numbers are clamped at the point of use and a
//! malformed quiet-hour window degrades to "never quiet" instead of failing.

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::actuator::{
    StripCommand, StripMode, clamp_percent, clamp_pump_seconds, clamp_strip_brightness,
    clamp_strip_duration,
};
use crate::error::ValidationError;

/// Local-time window during which automatic actuation is suppressed.
///
/// Half-open `[start, end)` in whole hours. When `start >= end` the window
/// wraps past midnight, so `23 → 7` covers 23:00 through 06:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuietHours {
    Window { start: u8, end: u8 },
    /// No quiet window. Also the result of parsing a malformed window.
    Off,
}

impl QuietHours {
    /// Build a window, rejecting hours outside `0..24`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::HourOutOfRange`] for either bound.
    pub fn window(start: i64, end: i64) -> Result<Self, ValidationError> {
        let hour = |h: i64| {
            u8::try_from(h)
                .ok()
                .filter(|h| *h < 24)
                .ok_or(ValidationError::HourOutOfRange(h))
        };
        Ok(Self::Window {
            start: hour(start)?,
            end: hour(end)?,
        })
    }

    /// Whether `hour` (local, `0..24`) falls inside the window.
    #[must_use]
    pub fn contains(self, hour: u32) -> bool {
        match self {
            Self::Off => false,
            Self::Window { start, end } => {
                let (start, end) = (u32::from(start), u32::from(end));
                if start < end {
                    start <= hour && hour < end
                } else {
                    hour >= start || hour < end
                }
            }
        }
    }

    /// Interpret a loosely-typed `[start, end]` pair.
    ///
    /// Integers, integral floats (`23.0`) and numeric strings are accepted. Anything else, including
    /// hours outside `0..24`, yields [`QuietHours::Off`].
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value.as_array().map(Vec::as_slice) {
            Some([start, end]) => match (parse_hour(start), parse_hour(end)) {
                (Some(start), Some(end)) => Self::window(start, end).unwrap_or(Self::Off),
                _ => Self::Off,
            },
            _ => Self::Off,
        }
    }
}

impl Default for QuietHours {
    fn default() -> Self {
        Self::Window { start: 23, end: 7 }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_hour(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|h| h.fract() == 0.0 && (0.0..24.0).contains(h))
                .map(|h| h as i64)
        }),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Serialize for QuietHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Window { start, end } => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(start)?;
                seq.serialize_element(end)?;
                seq.end()
            }
            Self::Off => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for QuietHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Whether `hour` is inside `window`.
#[must_use]
pub fn is_within_quiet_hours(hour: u32, window: QuietHours) -> bool {
    window.contains(hour)
}

/// LED strip sub-configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedStripConfig {
    pub enabled: bool,
    pub mode: StripMode,
    /// Requested brightness; clamped into `0..=255` when used.
    pub brightness: i64,
    /// Requested on-time; clamped into `1..=60` seconds when used.
    pub duration_s: i64,
}

impl Default for LedStripConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: StripMode::White,
            brightness: 128,
            duration_s: 10,
        }
    }
}

impl LedStripConfig {
    /// The strip command this configuration asks for, clamped.
    #[must_use]
    pub fn command(&self) -> StripCommand {
        StripCommand::clamped(self.mode, self.brightness, self.duration_s)
    }
}

/// Automatic-control policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoControlConfig {
    pub enabled: bool,
    pub quiet_hours: QuietHours,
    /// Water when soil moisture (%) drops below this.
    pub soil_low_threshold: f64,
    /// Requested pump pulse; clamped into `1..=30` seconds when used.
    pub pump_duration_s: i64,
    /// Add light when illuminance (lux) drops below this.
    pub light_target_lux: f64,
    /// Requested plain-light brightness; clamped into `0..=100` when used.
    pub normal_light_brightness: i64,
    #[serde(alias = "ws2812")]
    pub strip: LedStripConfig,
}

impl Default for AutoControlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quiet_hours: QuietHours::default(),
            soil_low_threshold: 35.0,
            pump_duration_s: 3,
            light_target_lux: 350.0,
            normal_light_brightness: 70,
            strip: LedStripConfig::default(),
        }
    }
}

impl AutoControlConfig {
    /// Pump pulse length in seconds, clamped.
    #[must_use]
    pub fn pump_pulse_s(&self) -> u32 {
        clamp_pump_seconds(self.pump_duration_s)
    }

    /// Plain-light brightness in percent, clamped.
    #[must_use]
    pub fn light_brightness(&self) -> u8 {
        clamp_percent(self.normal_light_brightness)
    }

    /// Copy with every numeric field pulled into its safe range.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let strip = self.strip.command();
        Self {
            enabled: self.enabled,
            quiet_hours: self.quiet_hours,
            soil_low_threshold: self.soil_low_threshold.max(0.0),
            pump_duration_s: i64::from(self.pump_pulse_s()),
            light_target_lux: self.light_target_lux.max(0.0),
            normal_light_brightness: i64::from(self.light_brightness()),
            strip: LedStripConfig {
                enabled: self.strip.enabled,
                mode: strip.mode,
                brightness: i64::from(strip.brightness),
                duration_s: i64::from(strip.duration_s),
            },
        }
    }

    /// Merge `patch` over this configuration and normalize the result.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotFinite`] when a threshold is NaN or infinite.
    pub fn apply(&self, patch: &AutoControlPatch) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        if let Some(enabled) = patch.enabled {
            next.enabled = enabled;
        }
        if let Some(quiet_hours) = patch.quiet_hours {
            next.quiet_hours = quiet_hours;
        }
        if let Some(threshold) = patch.soil_low_threshold {
            next.soil_low_threshold = finite("soil_low_threshold", threshold)?;
        }
        if let Some(seconds) = patch.pump_duration_s {
            next.pump_duration_s = seconds;
        }
        if let Some(lux) = patch.light_target_lux {
            next.light_target_lux = finite("light_target_lux", lux)?;
        }
        if let Some(brightness) = patch.normal_light_brightness {
            next.normal_light_brightness = brightness;
        }
        if let Some(strip) = &patch.strip {
            if let Some(enabled) = strip.enabled {
                next.strip.enabled = enabled;
            }
            if let Some(mode) = strip.mode {
                next.strip.mode = mode;
            }
            if let Some(brightness) = strip.brightness {
                next.strip.brightness = i64::from(clamp_strip_brightness(brightness));
            }
            if let Some(duration) = strip.duration_s {
                next.strip.duration_s = i64::from(clamp_strip_duration(duration));
            }
        }
        Ok(next.normalized())
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

/// Partial update of [`AutoControlConfig`]; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoControlPatch {
    pub enabled: Option<bool>,
    pub quiet_hours: Option<QuietHours>,
    pub soil_low_threshold: Option<f64>,
    pub pump_duration_s: Option<i64>,
    pub light_target_lux: Option<f64>,
    pub normal_light_brightness: Option<i64>,
    #[serde(alias = "ws2812")]
    pub strip: Option<LedStripPatch>,
}

/// Partial update of [`LedStripConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedStripPatch {
    pub enabled: Option<bool>,
    pub mode: Option<StripMode>,
    pub brightness: Option<i64>,
    pub duration_s: Option<i64>,
}
