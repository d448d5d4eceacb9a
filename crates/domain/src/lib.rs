//! # planthub-domain
//!
//! Pure domain model for the planthub plant-care controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **sensor snapshots** (immutable point-in-time readings)
//! - Define the **auto-control policy** (quiet hours, thresholds, actuator limits)
//! - Define **actuators** and their safety clamps
//! - Define **action records** (audit trail) and **history records** (environment log)
//! - Define **manual control** requests and persisted **settings**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod action;
pub mod actuator;
pub mod auto_control;
pub mod control;
pub mod history;
pub mod sensor;
pub mod settings;
