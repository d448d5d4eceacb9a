//! Virtual LED strip: lit for a fixed duration, then dark.

use std::sync::Mutex;

use chrono::TimeDelta;
use planthub_domain::actuator::StripCommand;
use planthub_domain::time::Timestamp;

/// A simulated addressable LED strip.
#[derive(Default)]
pub struct VirtualStrip {
    lit: Mutex<Option<(StripCommand, Timestamp)>>,
}

impl VirtualStrip {
    /// The command shown at `now`, if its duration has not elapsed.
    #[must_use]
    pub fn current(&self, now: Timestamp) -> Option<StripCommand> {
        let (command, until) = (*self.lit.lock().ok()?)?;
        (now < until).then_some(command)
    }

    /// Show `command` from `now` for its duration.
    pub fn show(&self, command: StripCommand, now: Timestamp) {
        let until = now + TimeDelta::seconds(i64::from(command.duration_s));
        self.set(Some((command, until)));
    }

    pub fn off(&self) {
        self.set(None);
    }

    fn set(&self, value: Option<(StripCommand, Timestamp)>) {
        if let Ok(mut lit) = self.lit.lock() {
            *lit = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use planthub_domain::actuator::StripMode;

    #[test]
    fn should_go_dark_after_duration() {
        let strip = VirtualStrip::default();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let command = StripCommand::clamped(StripMode::Grow, 200, 10);

        strip.show(command, t0);

        assert_eq!(strip.current(t0 + TimeDelta::seconds(9)), Some(command));
        assert_eq!(strip.current(t0 + TimeDelta::seconds(10)), None);
    }

    #[test]
    fn should_switch_off_immediately() {
        let strip = VirtualStrip::default();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        strip.show(StripCommand::clamped(StripMode::Red, 50, 60), t0);

        strip.off();

        assert_eq!(strip.current(t0), None);
    }
}
