//! Manual control: operator-issued actuator commands.

use planthub_domain::action::{ActionKind, ActionRecord};
use planthub_domain::control::{ManualCommand, ManualControl, detail};
use planthub_domain::error::{ActuatorError, PlantHubError};
use planthub_domain::time::now;

use crate::ports::{ActionLog, ActuatorGateway};

/// Applies [`ManualControl`] requests. Never touches the auto-control
/// cooldowns.
pub struct ControlService<G, L> {
    gateway: G,
    audit: L,
}

impl<G: ActuatorGateway, L: ActionLog> ControlService<G, L> {
    pub fn new(gateway: G, audit: L) -> Self {
        Self { gateway, audit }
    }

    /// Clamp `request`, execute its commands in order and append one
    /// `manual` audit record listing what ran. Returns the clamped request.
    ///
    /// # Errors
    ///
    /// Returns [`PlantHubError::Actuator`] when a command fails; commands
    /// after it are skipped and the ones before it are still audited.
    /// Returns a storage error if the audit append fails.
    #[tracing::instrument(skip(self))]
    pub async fn apply(&self, request: ManualControl) -> Result<ManualControl, PlantHubError> {
        let request = request.clamped();
        let mut executed = Vec::new();
        let mut failure = None;

        for command in request.commands() {
            match self.execute(command).await {
                Ok(()) => executed.push(command),
                Err(err) => {
                    tracing::warn!(%command, %err, "manual command failed");
                    failure = Some(err);
                    break;
                }
            }
        }

        let record = ActionRecord::new(now(), ActionKind::Manual, detail(&executed));
        tracing::info!(detail = %record.detail, "manual control applied");
        let audited = self.audit.append(record).await;

        if let Some(err) = failure {
            if let Err(audit_err) = audited {
                tracing::warn!(%audit_err, "failed to append manual action record");
            }
            return Err(err.into());
        }
        audited?;
        Ok(request)
    }

    async fn execute(&self, command: ManualCommand) -> Result<(), ActuatorError> {
        match command {
            ManualCommand::PumpPulse(seconds) => self.gateway.pulse_pump(seconds).await,
            ManualCommand::PumpOff => self.gateway.pump_off().await,
            ManualCommand::LightOn(pct) => self.gateway.activate_light(pct).await,
            ManualCommand::LightOff => self.gateway.light_off().await,
            ManualCommand::StripOn(strip) => self.gateway.activate_strip(strip).await,
            ManualCommand::StripOff => self.gateway.strip_off().await,
        }
    }

    /// The last `limit` audit records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the action log.
    pub async fn recent_actions(&self, limit: usize) -> Result<Vec<ActionRecord>, PlantHubError> {
        self.audit.recent(limit).await
    }
}
