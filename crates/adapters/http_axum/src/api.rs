//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod actions;
#[allow(clippy::missing_errors_doc)]
pub mod control;
#[allow(clippy::missing_errors_doc)]
pub mod history;
pub mod sensors;
#[allow(clippy::missing_errors_doc)]
pub mod settings;

use axum::Router;
use axum::routing::{get, post};

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, G, H, A, ST, RS>() -> Router<AppState<S, G, H, A, ST, RS>>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    Router::new()
        .route("/sensors", get(sensors::read::<S, G, H, A, ST, RS>))
        // History
        .route("/history", get(history::list::<S, G, H, A, ST, RS>))
        .route(
            "/history/download",
            get(history::download::<S, G, H, A, ST, RS>),
        )
        // Audit trail
        .route("/actions", get(actions::list::<S, G, H, A, ST, RS>))
        // Settings
        .route(
            "/settings",
            get(settings::get::<S, G, H, A, ST, RS>).post(settings::update::<S, G, H, A, ST, RS>),
        )
        // Manual control
        .route("/control", post(control::apply::<S, G, H, A, ST, RS>))
}
