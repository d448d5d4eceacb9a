//! Shared application state for axum handlers.

use std::sync::Arc;

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_app::services::{ControlService, SettingsService};

/// Application state shared across all axum handlers.
///
/// Generic over the sensor provider, actuator gateway, history log, action
/// log, settings store and recorder schedule to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<S, G, H, A, ST, RS> {
    /// Source of fresh sensor snapshots.
    pub sensors: Arc<S>,
    /// Environmental history for queries and CSV export.
    pub history: Arc<H>,
    /// Manual actuator control and the audit trail.
    pub control: Arc<ControlService<G, A>>,
    /// Operator settings.
    pub settings: Arc<SettingsService<ST, RS>>,
}

impl<S, G, H, A, ST, RS> Clone for AppState<S, G, H, A, ST, RS> {
    fn clone(&self) -> Self {
        Self {
            sensors: Arc::clone(&self.sensors),
            history: Arc::clone(&self.history),
            control: Arc::clone(&self.control),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<S, G, H, A, ST, RS> AppState<S, G, H, A, ST, RS>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        sensors: S,
        history: H,
        control: ControlService<G, A>,
        settings: SettingsService<ST, RS>,
    ) -> Self {
        Self::from_arcs(
            Arc::new(sensors),
            Arc::new(history),
            Arc::new(control),
            Arc::new(settings),
        )
    }

    /// Create a new application state from pre-wrapped `Arc`s.
    ///
    /// Use this when adapters need to be shared with background tasks
    /// before constructing the HTTP state.
    pub fn from_arcs(
        sensors: Arc<S>,
        history: Arc<H>,
        control: Arc<ControlService<G, A>>,
        settings: Arc<SettingsService<ST, RS>>,
    ) -> Self {
        Self {
            sensors,
            history,
            control,
            settings,
        }
    }
}
