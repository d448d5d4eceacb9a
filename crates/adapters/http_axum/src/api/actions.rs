//! JSON REST handler for the actuator audit trail.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_domain::action::ActionRecord;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 50;

/// Query parameters for the actions endpoint.
#[derive(Deserialize)]
pub struct ActionsQuery {
    pub n: Option<usize>,
}

/// Possible responses from the actions list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ActionRecord>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/actions?n=`
pub async fn list<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
    Query(params): Query<ActionsQuery>,
) -> Result<ListResponse, ApiError>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    let records = state
        .control
        .recent_actions(params.n.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(ListResponse::Ok(Json(records)))
}
