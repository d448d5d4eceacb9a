//! JSON REST handler for manual actuator control.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_domain::control::ManualControl;

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned once every command ran.
#[derive(Serialize)]
pub struct Applied {
    pub ok: bool,
    /// The request as executed, after clamping.
    pub echo: ManualControl,
}

/// Possible responses from the control endpoint.
pub enum ApplyResponse {
    Ok(Json<Applied>),
}

impl IntoResponse for ApplyResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/control`
pub async fn apply<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
    Json(request): Json<ManualControl>,
) -> Result<ApplyResponse, ApiError>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    let echo = state.control.apply(request).await?;
    Ok(ApplyResponse::Ok(Json(Applied { ok: true, echo })))
}
