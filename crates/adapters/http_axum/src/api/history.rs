//! JSON REST handlers for the environmental history.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_domain::error::PlantHubError;
use planthub_domain::history::{HistoryRecord, to_csv};
use planthub_domain::time::{local_day_range, parse_date};

use crate::error::ApiError;
use crate::state::AppState;

/// Default number of rows when no date range is given.
const DEFAULT_LIMIT: usize = 200;

/// Query parameters for the history endpoint.
#[derive(Deserialize)]
pub struct HistoryQuery {
    /// Number of most recent rows. Ignored when a date range is given.
    pub n: Option<usize>,
    /// First local day to include (`YYYY-MM-DD`).
    pub since: Option<String>,
    /// Last local day to include (`YYYY-MM-DD`).
    pub until: Option<String>,
}

/// Page of history rows.
#[derive(Serialize)]
pub struct HistoryPage {
    pub count: usize,
    pub items: Vec<HistoryRecord>,
}

/// Possible responses from the history list endpoint.
pub enum ListResponse {
    Ok(Json<HistoryPage>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the download endpoint.
pub enum DownloadResponse {
    Csv(String),
}

impl IntoResponse for DownloadResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Csv(body) => (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"history.csv\"",
                    ),
                ],
                body,
            )
                .into_response(),
        }
    }
}

/// Parse an optional date parameter. Blank values count as absent.
fn parse_day(value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(parse_date)
        .transpose()
        .map_err(|err| ApiError::from(PlantHubError::from(err)))
}

/// `GET /api/history?n=&since=&until=`
pub async fn list<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
    Query(params): Query<HistoryQuery>,
) -> Result<ListResponse, ApiError>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    let since = parse_day(params.since.as_deref())?;
    let until = parse_day(params.until.as_deref())?;

    let items = if since.is_some() || until.is_some() {
        let (from, to) = local_day_range(since, until);
        state.history.between(from, to).await?
    } else {
        state
            .history
            .recent(params.n.unwrap_or(DEFAULT_LIMIT))
            .await?
    };

    Ok(ListResponse::Ok(Json(HistoryPage {
        count: items.len(),
        items,
    })))
}

/// `GET /api/history/download`: the full history as CSV.
pub async fn download<S, G, H, A, ST, RS>(
    State(state): State<AppState<S, G, H, A, ST, RS>>,
) -> Result<DownloadResponse, ApiError>
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    let (from, to) = local_day_range(None, None);
    let records = state.history.between(from, to).await?;
    Ok(DownloadResponse::Csv(to_csv(&records)))
}
