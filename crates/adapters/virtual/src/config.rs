//! Configuration for the virtual adapter.

use planthub_domain::sensor::SensorKind;
use serde::Deserialize;

/// `[virtual]` section of the daemon configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Sensors that are simulated as not fitted.
    pub absent: Vec<SensorKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_every_sensor_present() {
        let config: VirtualConfig = toml::from_str("").unwrap();
        assert!(config.absent.is_empty());
    }

    #[test]
    fn should_parse_absent_sensors() {
        let config: VirtualConfig = toml::from_str(r#"absent = ["co2", "soil_moisture"]"#).unwrap();
        assert_eq!(config.absent, vec![SensorKind::Co2, SensorKind::SoilMoisture]);
    }

    #[test]
    fn should_reject_unknown_sensor() {
        let result: Result<VirtualConfig, _> = toml::from_str(r#"absent = ["radar"]"#);
        assert!(result.is_err());
    }
}
