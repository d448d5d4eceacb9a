//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod action_log;
pub mod actuators;
pub mod history_log;
pub mod schedule;
pub mod sensors;
pub mod settings_store;

pub use action_log::ActionLog;
pub use actuators::ActuatorGateway;
pub use history_log::HistoryLog;
pub use schedule::RecorderSchedule;
pub use sensors::SensorProvider;
pub use settings_store::SettingsStore;
