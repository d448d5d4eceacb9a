//! Simulated actuator gateway: pump, grow light and LED strip.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use planthub_app::ports::ActuatorGateway;
use planthub_domain::actuator::{ActuatorKind, StripCommand};
use planthub_domain::error::ActuatorError;
use planthub_domain::time::now;
use serde::Serialize;

use crate::devices::{VirtualLight, VirtualPump, VirtualStrip};
use crate::error::VirtualError;

/// Point-in-time state of every simulated actuator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActuatorStatus {
    pub pump_running: bool,
    pub pump_pulses: u64,
    pub light_pct: Option<u8>,
    pub strip: Option<StripCommand>,
}

/// Actuator gateway driving simulated devices.
///
/// Cloning is cheap; clones drive the same devices.
#[derive(Clone, Default)]
pub struct VirtualActuators {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    pump: VirtualPump,
    light: VirtualLight,
    strip: VirtualStrip,
    failing: Mutex<HashSet<ActuatorKind>>,
    released: AtomicBool,
}

impl VirtualActuators {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn status(&self) -> ActuatorStatus {
        ActuatorStatus {
            pump_running: self.inner.pump.is_running(),
            pump_pulses: self.inner.pump.pulses(),
            light_pct: self.inner.light.brightness(),
            strip: self.inner.strip.current(now()),
        }
    }

    /// Make every command to `kind` fail until [`VirtualActuators::heal`].
    pub fn fail(&self, kind: ActuatorKind) {
        if let Ok(mut failing) = self.inner.failing.lock() {
            failing.insert(kind);
        }
    }

    pub fn heal(&self, kind: ActuatorKind) {
        if let Ok(mut failing) = self.inner.failing.lock() {
            failing.remove(&kind);
        }
    }

    /// Switch everything off and refuse further commands.
    pub fn release(&self) {
        self.inner.released.store(true, Ordering::SeqCst);
        self.inner.pump.off();
        self.inner.light.off();
        self.inner.strip.off();
        tracing::info!("virtual actuators released");
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.inner.released.load(Ordering::SeqCst)
    }

    fn check(&self, kind: ActuatorKind) -> Result<(), VirtualError> {
        if self.is_released() {
            return Err(VirtualError::Released(kind));
        }
        let injected = self
            .inner
            .failing
            .lock()
            .is_ok_and(|failing| failing.contains(&kind));
        if injected {
            return Err(VirtualError::Injected(kind));
        }
        Ok(())
    }
}

impl ActuatorGateway for VirtualActuators {
    fn pulse_pump(&self, seconds: u32) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        let this = self.clone();
        async move {
            this.check(ActuatorKind::Pump).map_err(ActuatorError::from)?;
            tracing::info!(seconds, "pump on");
            this.inner.pump.pulse(seconds).await;
            tracing::debug!("pump pulse finished");
            Ok::<(), ActuatorError>(())
        }
    }

    fn pump_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        let result = self.check(ActuatorKind::Pump).map(|()| {
            self.inner.pump.off();
            tracing::info!("pump off");
        });
        let result = result.map_err(ActuatorError::from);
        async move { result }
    }

    fn activate_light(
        &self,
        brightness_pct: u8,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        let result = self.check(ActuatorKind::Light).map(|()| {
            self.inner.light.on(brightness_pct);
            tracing::info!(brightness_pct, "light on");
        });
        let result = result.map_err(ActuatorError::from);
        async move { result }
    }

    fn light_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        let result = self.check(ActuatorKind::Light).map(|()| {
            self.inner.light.off();
            tracing::info!("light off");
        });
        let result = result.map_err(ActuatorError::from);
        async move { result }
    }

    fn activate_strip(
        &self,
        command: StripCommand,
    ) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        let result = self.check(ActuatorKind::Strip).map(|()| {
            self.inner.strip.show(command, now());
            tracing::info!(
                mode = %command.mode,
                brightness = command.brightness,
                duration_s = command.duration_s,
                "strip on"
            );
        });
        let result = result.map_err(ActuatorError::from);
        async move { result }
    }

    fn strip_off(&self) -> impl Future<Output = Result<(), ActuatorError>> + Send {
        let result = self.check(ActuatorKind::Strip).map(|()| {
            self.inner.strip.off();
            tracing::info!("strip off");
        });
        let result = result.map_err(ActuatorError::from);
        async move { result }
    }
}
