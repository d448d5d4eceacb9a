//! Sensor snapshot: an immutable point-in-time set of environmental readings.
//!
//! Every reading is optional: a sensor that is not fitted, not ready, or
//! failed to answer is recorded as absent. Absent is never synthesized into
//! a default value such as zero.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// One physical quantity the sensor provider can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Humidity,
    Light,
    Co2,
    Tvoc,
    SoilMoisture,
}

impl SensorKind {
    /// All sensor kinds in history column order.
    pub const ALL: [Self; 6] = [
        Self::Temperature,
        Self::Humidity,
        Self::Light,
        Self::Co2,
        Self::Tvoc,
        Self::SoilMoisture,
    ];
}

/// Readings captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub taken_at: Timestamp,
    /// Air temperature, °C.
    pub temperature_c: Option<f64>,
    /// Relative humidity, %.
    pub humidity_pct: Option<f64>,
    /// Illuminance, lux.
    pub light_lux: Option<f64>,
    /// CO₂-equivalent, ppm.
    pub eco2_ppm: Option<f64>,
    /// Total volatile organic compounds, ppb.
    pub tvoc_ppb: Option<f64>,
    /// Soil moisture, %.
    pub soil_moisture_pct: Option<f64>,
}

impl SensorSnapshot {
    /// Create a builder for constructing a [`SensorSnapshot`].
    #[must_use]
    pub fn builder() -> SensorSnapshotBuilder {
        SensorSnapshotBuilder::default()
    }

    /// A snapshot with every reading absent.
    #[must_use]
    pub fn empty(taken_at: Timestamp) -> Self {
        Self::builder().taken_at(taken_at).build()
    }

    /// Look up a reading by kind.
    #[must_use]
    pub fn get(&self, kind: SensorKind) -> Option<f64> {
        match kind {
            SensorKind::Temperature => self.temperature_c,
            SensorKind::Humidity => self.humidity_pct,
            SensorKind::Light => self.light_lux,
            SensorKind::Co2 => self.eco2_ppm,
            SensorKind::Tvoc => self.tvoc_ppb,
            SensorKind::SoilMoisture => self.soil_moisture_pct,
        }
    }

    /// Readings in history column order.
    #[must_use]
    pub fn readings(&self) -> [Option<f64>; 6] {
        SensorKind::ALL.map(|kind| self.get(kind))
    }
}

/// Step-by-step builder for [`SensorSnapshot`].
#[derive(Debug, Default)]
pub struct SensorSnapshotBuilder {
    taken_at: Option<Timestamp>,
    readings: [Option<f64>; 6],
}

impl SensorSnapshotBuilder {
    #[must_use]
    pub fn taken_at(mut self, taken_at: Timestamp) -> Self {
        self.taken_at = Some(taken_at);
        self
    }

    /// Set a reading. Non-finite values are stored as absent.
    #[must_use]
    pub fn reading(mut self, kind: SensorKind, value: f64) -> Self {
        self.readings[Self::slot(kind)] = value.is_finite().then_some(value);
        self
    }

    /// Set a reading that may be absent.
    #[must_use]
    pub fn maybe(self, kind: SensorKind, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.reading(kind, value),
            None => self.absent(kind),
        }
    }

    /// Mark a reading absent.
    #[must_use]
    pub fn absent(mut self, kind: SensorKind) -> Self {
        self.readings[Self::slot(kind)] = None;
        self
    }

    /// Consume the builder and return a [`SensorSnapshot`].
    #[must_use]
    pub fn build(self) -> SensorSnapshot {
        let [temperature_c, humidity_pct, light_lux, eco2_ppm, tvoc_ppb, soil_moisture_pct] =
            self.readings;
        SensorSnapshot {
            taken_at: self.taken_at.unwrap_or_else(crate::time::now),
            temperature_c,
            humidity_pct,
            light_lux,
            eco2_ppm,
            tvoc_ppb,
            soil_moisture_pct,
        }
    }

    fn slot(kind: SensorKind) -> usize {
        SensorKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_default_every_reading_to_absent() {
        let snapshot = SensorSnapshot::builder().build();
        assert!(snapshot.readings().iter().all(Option::is_none));
    }

    #[test]
    fn should_store_readings_by_kind() {
        let snapshot = SensorSnapshot::builder()
            .reading(SensorKind::SoilMoisture, 20.0)
            .reading(SensorKind::Light, 100.0)
            .build();
        assert_eq!(snapshot.soil_moisture_pct, Some(20.0));
        assert_eq!(snapshot.light_lux, Some(100.0));
        assert_eq!(snapshot.temperature_c, None);
    }

    #[test]
    fn should_treat_nan_as_absent() {
        let snapshot = SensorSnapshot::builder()
            .reading(SensorKind::Temperature, f64::NAN)
            .build();
        assert_eq!(snapshot.temperature_c, None);
    }

    #[test]
    fn should_list_readings_in_column_order() {
        let snapshot = SensorSnapshot::builder()
            .reading(SensorKind::Temperature, 21.5)
            .reading(SensorKind::Tvoc, 12.0)
            .build();
        assert_eq!(
            snapshot.readings(),
            [Some(21.5), None, None, None, Some(12.0), None]
        );
    }

    #[test]
    fn should_keep_explicit_taken_at() {
        let ts = now();
        let snapshot = SensorSnapshot::empty(ts);
        assert_eq!(snapshot.taken_at, ts);
    }

    #[test]
    fn should_serialize_absent_reading_as_null() {
        let snapshot = SensorSnapshot::builder().build();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["soil_moisture_pct"].is_null());
    }
}
