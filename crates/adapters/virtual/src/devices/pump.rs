//! Virtual water pump: runs for the requested pulse, then stops.

use std::sync::Mutex;
use std::time::Duration;

/// A simulated pump.
#[derive(Default)]
pub struct VirtualPump {
    state: Mutex<PumpState>,
}

#[derive(Default)]
struct PumpState {
    /// Pulses currently pumping. Overlapping pulses keep the pump on until
    /// the last one ends.
    active: u32,
    pulses: u64,
}

impl VirtualPump {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.lock().is_ok_and(|state| state.active > 0)
    }

    /// Number of pulses started since creation.
    #[must_use]
    pub fn pulses(&self) -> u64 {
        self.state.lock().map_or(0, |state| state.pulses)
    }

    /// Run for `seconds`, then stop unless another pulse is still running.
    pub async fn pulse(&self, seconds: u32) {
        if let Ok(mut state) = self.state.lock() {
            state.active += 1;
            state.pulses += 1;
        }
        tokio::time::sleep(Duration::from_secs(u64::from(seconds))).await;
        if let Ok(mut state) = self.state.lock() {
            state.active = state.active.saturating_sub(1);
        }
    }

    /// Stop immediately, whatever pulses are in flight.
    pub fn off(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.active = 0;
        }
    }
}
