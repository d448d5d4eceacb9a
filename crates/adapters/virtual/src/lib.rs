//! # planthub-adapter-virtual
//!
//! Virtual/demo adapter that simulates the plant box hardware for testing
//! and demonstration purposes.
//!
//! ## Provided devices
//!
//! | Device | Port | Behaviour |
//! |--------|------|-----------|
//! | Environmental sensors | `SensorProvider` | Readings follow the time of day; kinds listed in `absent` always read as absent |
//! | Water pump | `ActuatorGateway` | On for the pulse duration, then off |
//! | Grow light | `ActuatorGateway` | Holds its brightness until switched off |
//! | LED strip | `ActuatorGateway` | Shows a mode and brightness until its duration elapses |
//!
//! ## Dependency rule
//!
//! Depends on `planthub-app` (port traits) and `planthub-domain` only.

mod actuators;
mod config;
mod devices;
mod error;
mod sensors;

pub use actuators::{ActuatorStatus, VirtualActuators};
pub use config::VirtualConfig;
pub use error::VirtualError;
pub use sensors::VirtualSensors;
