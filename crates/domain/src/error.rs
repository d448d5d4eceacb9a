//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PlantHubError`] via `#[from]` / `From` at the port boundary.

use crate::actuator::ActuatorKind;

/// Top-level error returned by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum PlantHubError {
    /// A value failed a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// An actuator command failed.
    #[error("actuator error")]
    Actuator(#[from] ActuatorError),

    /// A persistence adapter failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An hour outside `0..24`.
    #[error("hour {0} is outside 0..24")]
    HourOutOfRange(i64),

    /// A date query parameter that is not `YYYY-MM-DD`.
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A numeric setting that is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Name of the offending field.
        field: &'static str,
    },

    /// An unknown LED strip mode.
    #[error("unknown strip mode {0:?}")]
    UnknownStripMode(String),
}

/// A lookup that found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of record looked up.
    pub entity: &'static str,
    /// Identifier that was requested.
    pub id: String,
}

/// An actuator rejected or failed a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{actuator} failed: {message}")]
pub struct ActuatorError {
    /// Which actuator class failed.
    pub actuator: ActuatorKind,
    /// Human-readable reason from the gateway.
    pub message: String,
}

impl ActuatorError {
    /// Build an error for `actuator` with the given reason.
    pub fn new(actuator: ActuatorKind, message: impl Into<String>) -> Self {
        Self {
            actuator,
            message: message.into(),
        }
    }
}
