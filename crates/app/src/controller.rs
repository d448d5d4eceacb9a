//! Auto-control loop: applies the irrigation and illumination rules once per
//! tick.
//!
//! Each tick takes one snapshot of the live [`AutoControlConfig`], checks the
//! enabled flag and quiet hours, reads the sensors and evaluates each rule
//! against its own cooldown. Only a successful actuator command advances the
//! cooldown, so a failing actuator is retried on the next tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use planthub_domain::action::ActionRecord;
use planthub_domain::actuator::ActuatorKind;
use planthub_domain::auto_control::{AutoControlConfig, is_within_quiet_hours};
use planthub_domain::error::{ActuatorError, PlantHubError};
use planthub_domain::sensor::SensorSnapshot;
use planthub_domain::time::{LocalTime, Timestamp, hour_of, local_now};

use crate::config_cell::ConfigCell;
use crate::ports::{ActionLog, ActuatorGateway, SensorProvider};
use crate::throttle::ThrottleState;
use crate::timer::Task;

/// Fixed interval between two controller ticks.
pub const CONTROL_INTERVAL: Duration = Duration::from_secs(60);

/// What a tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Disabled,
    QuietHours,
    /// Rules were evaluated; `fired` lists the actuators activated successfully.
    Evaluated { fired: Vec<ActuatorKind> },
}

/// Owns the throttle state and drives actuators from sensor readings.
pub struct Controller<S, G, L> {
    sensors: S,
    gateway: G,
    audit: L,
    config: Arc<ConfigCell<AutoControlConfig>>,
    throttle: ThrottleState,
}

impl<S, G, L> Controller<S, G, L>
where
    S: SensorProvider,
    G: ActuatorGateway,
    L: ActionLog,
{
    pub fn new(sensors: S, gateway: G, audit: L, config: Arc<ConfigCell<AutoControlConfig>>) -> Self {
        Self {
            sensors,
            gateway,
            audit,
            config,
            throttle: ThrottleState::default(),
        }
    }

    #[must_use]
    pub fn throttle(&self) -> &ThrottleState {
        &self.throttle
    }

    /// Run one tick against the current config, wall clock and sensors.
    #[tracing::instrument(skip(self))]
    pub async fn tick(&mut self) -> TickOutcome {
        let config = self.config.snapshot();
        let now = local_now();
        if !config.enabled {
            tracing::debug!("auto-control disabled");
            return TickOutcome::Disabled;
        }
        if is_within_quiet_hours(hour_of(&now), config.quiet_hours) {
            tracing::debug!(hour = hour_of(&now), "quiet hours, skipping");
            return TickOutcome::QuietHours;
        }
        let snapshot = self.sensors.read_all().await;
        self.evaluate(&config, &snapshot, now).await
    }

    /// Evaluate every rule against an explicit config, snapshot and time.
    pub async fn evaluate(
        &mut self,
        config: &AutoControlConfig,
        snapshot: &SensorSnapshot,
        now: LocalTime,
    ) -> TickOutcome {
        if !config.enabled {
            return TickOutcome::Disabled;
        }
        if is_within_quiet_hours(hour_of(&now), config.quiet_hours) {
            return TickOutcome::QuietHours;
        }

        let at = now.with_timezone(&Utc);
        let mut fired = Vec::new();

        if self.irrigate(config, snapshot, at).await {
            fired.push(ActuatorKind::Pump);
        }
        if let Some(kind) = self.illuminate(config, snapshot, at).await {
            fired.push(kind);
        }

        TickOutcome::Evaluated { fired }
    }

    async fn irrigate(
        &mut self,
        config: &AutoControlConfig,
        snapshot: &SensorSnapshot,
        at: Timestamp,
    ) -> bool {
        let dry = snapshot
            .soil_moisture_pct
            .is_some_and(|soil| soil < config.soil_low_threshold);
        if !dry || !self.throttle.ready(ActuatorKind::Pump, at) {
            return false;
        }
        let seconds = config.pump_pulse_s();
        let result = self.gateway.pulse_pump(seconds).await;
        self.settle(ActuatorKind::Pump, result, ActionRecord::pump(at, seconds), at)
            .await
    }

    async fn illuminate(
        &mut self,
        config: &AutoControlConfig,
        snapshot: &SensorSnapshot,
        at: Timestamp,
    ) -> Option<ActuatorKind> {
        let dark = snapshot
            .light_lux
            .is_some_and(|lux| lux < config.light_target_lux);
        if !dark {
            return None;
        }

        if config.strip.enabled {
            if !self.throttle.ready(ActuatorKind::Strip, at) {
                return None;
            }
            let command = config.strip.command();
            let result = self.gateway.activate_strip(command).await;
            let record = ActionRecord::strip(at, &command);
            return self
                .settle(ActuatorKind::Strip, result, record, at)
                .await
                .then_some(ActuatorKind::Strip);
        }

        if !self.throttle.ready(ActuatorKind::Light, at) {
            return None;
        }
        let brightness = config.light_brightness();
        let result = self.gateway.activate_light(brightness).await;
        let record = ActionRecord::light(at, brightness);
        self.settle(ActuatorKind::Light, result, record, at)
            .await
            .then_some(ActuatorKind::Light)
    }

    /// Advance the cooldown and audit a successful command; log a failed one.
    async fn settle(
        &mut self,
        actuator: ActuatorKind,
        result: Result<(), ActuatorError>,
        record: ActionRecord,
        at: Timestamp,
    ) -> bool {
        if let Err(err) = result {
            tracing::warn!(%actuator, %err, "actuator command failed, retrying next tick");
            return false;
        }
        self.throttle.mark(actuator, at);
        tracing::info!(%actuator, detail = %record.detail, "auto-control triggered");
        if let Err(err) = self.audit.append(record).await {
            tracing::warn!(%err, "failed to append action record");
        }
        true
    }
}

impl<S, G, L> Task for Controller<S, G, L>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    L: ActionLog + 'static,
{
    fn name(&self) -> &'static str {
        "auto-control"
    }

    async fn run(&mut self) -> Result<(), PlantHubError> {
        self.tick().await;
        Ok(())
    }
}
