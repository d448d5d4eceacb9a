//! Per-actuator cooldown bookkeeping.

use std::collections::HashMap;
use std::time::Duration;

use planthub_domain::actuator::ActuatorKind;
use planthub_domain::time::Timestamp;

/// Minimum time between two automatic activations of the same actuator.
pub const COOLDOWN: Duration = Duration::from_secs(300);

/// Last successful automatic activation of each actuator.
#[derive(Debug, Clone)]
pub struct ThrottleState {
    cooldown: Duration,
    last: HashMap<ActuatorKind, Timestamp>,
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self::new(COOLDOWN)
    }
}

impl ThrottleState {
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: HashMap::new(),
        }
    }

    /// Whether `kind` may be activated at `now`: it never was, or strictly
    /// more than the cooldown has elapsed since. A clock that moved backwards
    /// counts as "not yet".
    #[must_use]
    pub fn ready(&self, kind: ActuatorKind, now: Timestamp) -> bool {
        match self.last.get(&kind) {
            None => true,
            Some(last) => now
                .signed_duration_since(*last)
                .to_std()
                .is_ok_and(|elapsed| elapsed > self.cooldown),
        }
    }

    /// Record a successful activation.
    pub fn mark(&mut self, kind: ActuatorKind, now: Timestamp) {
        self.last.insert(kind, now);
    }

    #[must_use]
    pub fn last_triggered(&self, kind: ActuatorKind) -> Option<Timestamp> {
        self.last.get(&kind).copied()
    }
}
