//! History records: one row of the periodic environmental log.

use std::fmt::Write as _;

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::sensor::SensorSnapshot;
use crate::time::Timestamp;

/// Column names, in the fixed order rows are written.
pub const COLUMNS: [&str; 7] = [
    "timestamp",
    "temperature_c",
    "humidity_pct",
    "light_lux",
    "eco2_ppm",
    "tvoc_ppb",
    "soil_moisture_pct",
];

/// A recorded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub recorded_at: Timestamp,
    #[serde(flatten)]
    pub readings: Readings,
}

/// The six readings of a history row. `None` is the explicit no-value marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub light_lux: Option<f64>,
    pub eco2_ppm: Option<f64>,
    pub tvoc_ppb: Option<f64>,
    pub soil_moisture_pct: Option<f64>,
}

impl Readings {
    /// Values in column order (excluding the timestamp).
    #[must_use]
    pub fn as_array(&self) -> [Option<f64>; 6] {
        [
            self.temperature_c,
            self.humidity_pct,
            self.light_lux,
            self.eco2_ppm,
            self.tvoc_ppb,
            self.soil_moisture_pct,
        ]
    }
}

impl From<&SensorSnapshot> for Readings {
    fn from(snapshot: &SensorSnapshot) -> Self {
        let [
            temperature_c,
            humidity_pct,
            light_lux,
            eco2_ppm,
            tvoc_ppb,
            soil_moisture_pct,
        ] = snapshot.readings();
        Self {
            temperature_c,
            humidity_pct,
            light_lux,
            eco2_ppm,
            tvoc_ppb,
            soil_moisture_pct,
        }
    }
}

impl HistoryRecord {
    /// Build the row for `snapshot`, stamped with `recorded_at`.
    #[must_use]
    pub fn from_snapshot(recorded_at: Timestamp, snapshot: &SensorSnapshot) -> Self {
        Self {
            recorded_at,
            readings: Readings::from(snapshot),
        }
    }

    /// Render as one CSV line (no trailing newline). The timestamp is local
    /// time with its UTC offset. Absent readings are empty cells.
    #[must_use]
    pub fn to_csv_line(&self) -> String {
        let mut line = self
            .recorded_at
            .with_timezone(&Local)
            .to_rfc3339_opts(SecondsFormat::Secs, false);
        for value in self.readings.as_array() {
            line.push(',');
            if let Some(value) = value {
                let _ = write!(line, "{value}");
            }
        }
        line
    }
}

/// Render a full CSV document with header.
#[must_use]
pub fn to_csv(records: &[HistoryRecord]) -> String {
    let mut out = COLUMNS.join(",");
    out.push('\n');
    for record in records {
        out.push_str(&record.to_csv_line());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorKind;
    use chrono::{DateTime, TimeZone, Utc};

    fn at_noon() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn local_stamp(at: Timestamp) -> String {
        at.with_timezone(&Local)
            .to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    #[test]
    fn should_copy_readings_from_snapshot() {
        let snapshot = SensorSnapshot::builder()
            .reading(SensorKind::Temperature, 21.5)
            .reading(SensorKind::SoilMoisture, 40.0)
            .build();
        let record = HistoryRecord::from_snapshot(at_noon(), &snapshot);
        assert_eq!(record.readings.temperature_c, Some(21.5));
        assert_eq!(record.readings.soil_moisture_pct, Some(40.0));
        assert_eq!(record.readings.light_lux, None);
    }

    #[test]
    fn should_write_absent_values_as_empty_cells() {
        let snapshot = SensorSnapshot::builder()
            .reading(SensorKind::Temperature, 21.5)
            .reading(SensorKind::Co2, 0.0)
            .build();
        let record = HistoryRecord::from_snapshot(at_noon(), &snapshot);
        assert_eq!(
            record.to_csv_line(),
            format!("{},21.5,,,0,,", local_stamp(at_noon()))
        );
    }

    #[test]
    fn should_render_header_then_rows() {
        let record = HistoryRecord::from_snapshot(at_noon(), &SensorSnapshot::empty(at_noon()));
        let csv = to_csv(&[record]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,temperature_c,humidity_pct,light_lux,eco2_ppm,tvoc_ppb,soil_moisture_pct")
        );
        let row = format!("{},,,,,,", local_stamp(at_noon()));
        assert_eq!(lines.next(), Some(row.as_str()));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn should_stamp_csv_rows_with_local_offset() {
        let record = HistoryRecord::from_snapshot(at_noon(), &SensorSnapshot::empty(at_noon()));
        let line = record.to_csv_line();
        let stamp = line.split(',').next().unwrap();

        let parsed = DateTime::parse_from_rfc3339(stamp).unwrap();

        assert_eq!(parsed.with_timezone(&Utc), at_noon());
        assert_eq!(parsed.offset(), at_noon().with_timezone(&Local).offset());
    }

    #[test]
    fn should_flatten_readings_in_json() {
        let record = HistoryRecord::from_snapshot(at_noon(), &SensorSnapshot::empty(at_noon()));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("recorded_at").is_some());
        assert!(json["humidity_pct"].is_null());
    }
}
