//! Actuator port: the pump, the grow light and the LED strip.

use std::future::Future;
use std::sync::Arc;

use planthub_domain::actuator::StripCommand;
use planthub_domain::error::ActuatorError;

/// Drives the physical actuators.
///
/// Callers always pass values that already went through the domain clamps.
pub trait ActuatorGateway: Send + Sync {
    /// Run the pump for `seconds`, then switch it off.
    fn pulse_pump(&self, seconds: u32) -> impl Future<Output = Result<(), ActuatorError>> + Send;

    /// Switch the pump off immediately.
    fn pump_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send;

    /// Switch the grow light on at `brightness_pct` (`0..=100`).
    fn activate_light(
        &self,
        brightness_pct: u8,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send;

    fn light_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send;

    /// Show `command` on the strip for its duration.
    fn activate_strip(
        &self,
        command: StripCommand,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send;

    fn strip_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send;
}

impl<T: ActuatorGateway> ActuatorGateway for Arc<T> {
    fn pulse_pump(&self, seconds: u32) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).pulse_pump(seconds)
    }

    fn pump_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).pump_off()
    }

    fn activate_light(
        &self,
        brightness_pct: u8,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).activate_light(brightness_pct)
    }

    fn light_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).light_off()
    }

    fn activate_strip(
        &self,
        command: StripCommand,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).activate_strip(command)
    }

    fn strip_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        (**self).strip_off()
    }
}
