//! JSON REST handlers for operator settings.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_domain::settings::{Settings, SettingsPatch};

use crate::error::ApiError;
use crate::state::AppState;

/// Body returned after a successful update.
#[derive(Serialize)]
pub struct Saved {
    pub ok: bool,
    pub saved: Settings,
}

/// Possible responses from the settings get endpoint.
pub enum GetResponse {
    Ok(Json<Settings>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the settings update endpoint.
pub enum UpdateResponse {
    Ok(Json<Saved>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/settings`
pub async fn get<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
) -> GetResponse
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    GetResponse::Ok(Json(state.settings.get().await))
}

/// `POST /api/settings`: partial update.
pub async fn update<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
    Json(patch): Json<SettingsPatch>,
) -> Result<UpdateResponse, ApiError>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    let saved = state.settings.update(patch).await?;
    Ok(UpdateResponse::Ok(Json(Saved { ok: true, saved })))
}
