//! Virtual adapter error type.

use planthub_domain::actuator::ActuatorKind;
use planthub_domain::error::{ActuatorError, PlantHubError};

/// Errors raised by the simulated actuators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VirtualError {
    /// A failure injected with [`crate::VirtualActuators::fail`].
    #[error("simulated failure")]
    Injected(ActuatorKind),

    /// The actuators were released at shutdown and accept no more commands.
    #[error("hardware released")]
    Released(ActuatorKind),
}

impl VirtualError {
    fn actuator(&self) -> ActuatorKind {
        match self {
            Self::Injected(kind) | Self::Released(kind) => *kind,
        }
    }
}

impl From<VirtualError> for ActuatorError {
    fn from(err: VirtualError) -> Self {
        Self::new(err.actuator(), err.to_string())
    }
}

impl From<VirtualError> for PlantHubError {
    fn from(err: VirtualError) -> Self {
        Self::Actuator(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_the_actuator_in_domain_error() {
        let err = ActuatorError::from(VirtualError::Injected(ActuatorKind::Pump));
        assert_eq!(err.to_string(), "pump failed: simulated failure");
    }

    #[test]
    fn should_convert_into_actuator_variant() {
        let err = PlantHubError::from(VirtualError::Released(ActuatorKind::Strip));
        assert!(matches!(err, PlantHubError::Actuator(_)));
    }
}
