//! Simulated environmental sensors.

use std::f64::consts::TAU;
use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{Local, Timelike};
use planthub_app::ports::SensorProvider;
use planthub_domain::sensor::{SensorKind, SensorSnapshot};
use planthub_domain::time::{LocalTime, now};

use crate::config::VirtualConfig;

/// Sensor provider producing plausible readings that follow the time of day.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone, Default)]
pub struct VirtualSensors {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    absent: Vec<SensorKind>,
    fixed: Mutex<Option<SensorSnapshot>>,
}

impl VirtualSensors {
    #[must_use]
    pub fn new(config: &VirtualConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                absent: config.absent.clone(),
                fixed: Mutex::new(None),
            }),
        }
    }

    /// Serve `snapshot`'s readings instead of simulated ones. `None` resumes
    /// the simulation. Sensors configured absent stay absent either way.
    pub fn set_fixed(&self, snapshot: Option<SensorSnapshot>) {
        if let Ok(mut fixed) = self.inner.fixed.lock() {
            *fixed = snapshot;
        }
    }

    /// Readings the simulation yields at local time `at`.
    #[must_use]
    pub fn simulate(&self, at: LocalTime) -> SensorSnapshot {
        let minutes = f64::from(at.hour() * 60 + at.minute());
        // -1 at midnight, 1 at noon
        let day = (TAU * (minutes - 360.0) / 1440.0).sin();
        let builder = SensorSnapshot::builder()
            .taken_at(at.to_utc())
            .reading(SensorKind::Temperature, round1(21.0 + 4.0 * day))
            .reading(SensorKind::Humidity, round1(55.0 - 10.0 * day))
            .reading(SensorKind::Light, round1((800.0 * day).max(0.0)))
            .reading(SensorKind::Co2, round1(450.0 + 50.0 * (1.0 - day)))
            .reading(SensorKind::Tvoc, round1(20.0 + 10.0 * (1.0 - day)))
            .reading(SensorKind::SoilMoisture, round1(50.0 - 20.0 * minutes / 1440.0));
        self.strip_absent(builder.build())
    }

    fn strip_absent(&self, snapshot: SensorSnapshot) -> SensorSnapshot {
        let mut builder = SensorSnapshot::builder().taken_at(snapshot.taken_at);
        for kind in SensorKind::ALL {
            let value = snapshot.get(kind).filter(|_| !self.inner.absent.contains(&kind));
            builder = builder.maybe(kind, value);
        }
        builder.build()
    }
}

impl SensorProvider for VirtualSensors {
    fn read_all(&self) -> impl Future<Output = SensorSnapshot> + Send {
        let fixed = self.inner.fixed.lock().ok().and_then(|fixed| fixed.clone());
        let snapshot = match fixed {
            Some(fixed) => self.strip_absent(SensorSnapshot {
                taken_at: now(),
                ..fixed
            }),
            None => self.simulate(Local::now()),
        };
        async move { snapshot }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> LocalTime {
        Local.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn should_be_brighter_and_warmer_at_noon() {
        let sensors = VirtualSensors::default();
        let noon = sensors.simulate(at(12));
        let night = sensors.simulate(at(0));

        assert!(noon.light_lux.unwrap() > 700.0);
        assert_eq!(night.light_lux, Some(0.0));
        assert!(noon.temperature_c.unwrap() > night.temperature_c.unwrap());
    }

    #[test]
    fn should_produce_every_reading_by_default() {
        let snapshot = VirtualSensors::default().simulate(at(9));
        assert!(snapshot.readings().iter().all(Option::is_some));
    }

    #[tokio::test]
    async fn should_report_configured_sensors_as_absent() {
        let sensors = VirtualSensors::new(&VirtualConfig {
            absent: vec![SensorKind::Co2, SensorKind::Tvoc],
        });

        let snapshot = sensors.read_all().await;

        assert_eq!(snapshot.eco2_ppm, None);
        assert_eq!(snapshot.tvoc_ppb, None);
        assert!(snapshot.temperature_c.is_some());
    }

    #[tokio::test]
    async fn should_serve_fixed_snapshot() {
        let sensors = VirtualSensors::new(&VirtualConfig {
            absent: vec![SensorKind::Humidity],
        });
        sensors.set_fixed(Some(
            SensorSnapshot::builder()
                .reading(SensorKind::SoilMoisture, 12.0)
                .reading(SensorKind::Humidity, 40.0)
                .build(),
        ));

        let snapshot = sensors.read_all().await;

        assert_eq!(snapshot.soil_moisture_pct, Some(12.0));
        assert_eq!(snapshot.humidity_pct, None);
        assert_eq!(snapshot.light_lux, None);

        sensors.set_fixed(None);
        assert!(sensors.read_all().await.light_lux.is_some());
    }
}
