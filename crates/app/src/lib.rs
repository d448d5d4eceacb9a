//! # planthub-app
//!
//! Application layer: use-cases, the control loop and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SensorProvider`: one snapshot of every sensor
//!   - `ActuatorGateway`: pump, grow light, LED strip
//!   - `HistoryLog`: append & query environmental history
//!   - `ActionLog`: append & query the actuator audit trail
//!   - `SettingsStore`: load & save operator settings
//!   - `RecorderSchedule`: retime the history recorder
//! - Provide the **periodic timer** and the two tasks it drives:
//!   - `Controller`: auto-control rules with per-actuator cooldown
//!   - `Recorder`: periodic history rows
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ControlService`: manual actuator commands
//!   - `SettingsService`: read & patch settings
//!
//! ## Dependency rule
//! Depends on `planthub-domain` only (plus `tokio` for tasks, timers and sync).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod config_cell;
pub mod controller;
pub mod ports;
pub mod recorder;
pub mod scheduler;
pub mod services;
pub mod throttle;
pub mod timer;
