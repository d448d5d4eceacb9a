//! JSON REST handler for live sensor readings.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_domain::sensor::SensorSnapshot;

use crate::state::AppState;

/// Possible responses from the sensors endpoint.
pub enum ReadResponse {
    Ok(Json<SensorSnapshot>),
}

impl IntoResponse for ReadResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/sensors`: a fresh snapshot; absent readings are `null`.
pub async fn read<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
) -> ReadResponse
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    ReadResponse::Ok(Json(state.sensors.read_all().await))
}
