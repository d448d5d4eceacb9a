//! Axum router assembly.

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use planthub_app::ports::{
    ActionLog, ActuatorGateway, HistoryLog, RecorderSchedule, SensorProvider, SettingsStore,
};
use planthub_domain::time::{Timestamp, now};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and adds the `/health` and `/ping` health checks.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S, G, H, A, ST, RS>(state: AppState<S, G, H, A, ST, RS>) -> Router
where
    S: SensorProvider + 'static,
    G: ActuatorGateway + 'static,
    H: HistoryLog + 'static,
    A: ActionLog + 'static,
    ST: SettingsStore + 'static,
    RS: RecorderSchedule + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/ping", get(ping))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[derive(Serialize)]
struct Pong {
    ok: bool,
    time: Timestamp,
}

async fn ping() -> Json<Pong> {
    Json(Pong {
        ok: true,
        time: now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use planthub_app::config_cell::ConfigCell;
    use planthub_app::services::{ControlService, SettingsService};
    use planthub_domain::action::ActionRecord;
    use planthub_domain::actuator::{ActuatorKind, StripCommand};
    use planthub_domain::auto_control::AutoControlConfig;
    use planthub_domain::error::{ActuatorError, PlantHubError};
    use planthub_domain::history::HistoryRecord;
    use planthub_domain::sensor::{SensorKind, SensorSnapshot};
    use planthub_domain::settings::Settings;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    struct StubSensors;

    impl SensorProvider for StubSensors {
        async fn read_all(&self) -> SensorSnapshot {
            SensorSnapshot::builder()
                .reading(SensorKind::Temperature, 22.5)
                .reading(SensorKind::SoilMoisture, 41.0)
                .build()
        }
    }

    #[derive(Default)]
    struct StubGateway {
        calls: Mutex<Vec<String>>,
        broken: bool,
    }

    impl StubGateway {
        fn call(&self, kind: ActuatorKind, what: String) -> Result<(), ActuatorError> {
            if self.broken {
                return Err(ActuatorError::new(kind, "unplugged"));
            }
            self.calls.lock().unwrap().push(what);
            Ok(())
        }
    }

    impl ActuatorGateway for StubGateway {
        async fn pulse_pump(&self, seconds: u32) -> Result<(), ActuatorError> {
            self.call(ActuatorKind::Pump, format!("pump {seconds}"))
        }
        async fn pump_off(&self) -> Result<(), ActuatorError> {
            self.call(ActuatorKind::Pump, "pump off".to_string())
        }
        async fn activate_light(&self, brightness_pct: u8) -> Result<(), ActuatorError> {
            self.call(ActuatorKind::Light, format!("light {brightness_pct}"))
        }
        async fn light_off(&self) -> Result<(), ActuatorError> {
            self.call(ActuatorKind::Light, "light off".to_string())
        }
        async fn activate_strip(&self, command: StripCommand) -> Result<(), ActuatorError> {
            self.call(ActuatorKind::Strip, format!("strip {}", command.mode))
        }
        async fn strip_off(&self) -> Result<(), ActuatorError> {
            self.call(ActuatorKind::Strip, "strip off".to_string())
        }
    }

    #[derive(Default)]
    struct StubHistory {
        rows: Vec<HistoryRecord>,
        queries: Mutex<Vec<&'static str>>,
    }

    impl HistoryLog for StubHistory {
        async fn append(&self, _record: HistoryRecord) -> Result<(), PlantHubError> {
            Ok(())
        }
        async fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, PlantHubError> {
            self.queries.lock().unwrap().push("recent");
            let skip = self.rows.len().saturating_sub(limit);
            Ok(self.rows[skip..].to_vec())
        }
        async fn between(
            &self,
            from: Timestamp,
            to: Timestamp,
        ) -> Result<Vec<HistoryRecord>, PlantHubError> {
            self.queries.lock().unwrap().push("between");
            Ok(self
                .rows
                .iter()
                .filter(|r| r.recorded_at >= from && r.recorded_at < to)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct StubActions {
        records: Mutex<Vec<ActionRecord>>,
    }

    impl ActionLog for StubActions {
        async fn append(&self, record: ActionRecord) -> Result<(), PlantHubError> {
            self.records.lock().unwrap().push(record);
            Ok(())
        }
        async fn recent(&self, limit: usize) -> Result<Vec<ActionRecord>, PlantHubError> {
            let records = self.records.lock().unwrap();
            let skip = records.len().saturating_sub(limit);
            Ok(records[skip..].to_vec())
        }
    }

    #[derive(Default)]
    struct StubStore {
        saved: Mutex<Option<Settings>>,
    }

    impl SettingsStore for StubStore {
        async fn load(&self) -> Result<Settings, PlantHubError> {
            Ok(self.saved.lock().unwrap().clone().unwrap_or_default())
        }
        async fn save(&self, settings: &Settings) -> Result<(), PlantHubError> {
            *self.saved.lock().unwrap() = Some(settings.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubSchedule {
        intervals: Mutex<Vec<Duration>>,
    }

    impl RecorderSchedule for StubSchedule {
        async fn reschedule(&self, interval: Duration) -> bool {
            self.intervals.lock().unwrap().push(interval);
            true
        }
    }

    type TestState = AppState<
        StubSensors,
        Arc<StubGateway>,
        Arc<StubHistory>,
        Arc<StubActions>,
        Arc<StubStore>,
        Arc<StubSchedule>,
    >;

    struct Harness {
        gateway: Arc<StubGateway>,
        history: Arc<StubHistory>,
        store: Arc<StubStore>,
        schedule: Arc<StubSchedule>,
        config: Arc<ConfigCell<AutoControlConfig>>,
    }

    impl Harness {
        fn new(gateway: StubGateway, history: StubHistory) -> Self {
            Self {
                gateway: Arc::new(gateway),
                history: Arc::new(history),
                store: Arc::new(StubStore::default()),
                schedule: Arc::new(StubSchedule::default()),
                config: Arc::new(ConfigCell::default()),
            }
        }

        fn app(&self) -> Router {
            let actions = Arc::new(StubActions::default());
            let state: TestState = AppState::new(
                StubSensors,
                Arc::clone(&self.history),
                ControlService::new(Arc::clone(&self.gateway), actions),
                SettingsService::new(
                    Arc::clone(&self.store),
                    Arc::clone(&self.schedule),
                    Arc::clone(&self.config),
                    Settings::default(),
                ),
            );
            build(state)
        }
    }

    fn harness() -> Harness {
        Harness::new(StubGateway::default(), StubHistory::default())
    }

    fn history_rows(count: i64) -> StubHistory {
        let start = now() - chrono::Duration::days(count);
        let rows = (0..count)
            .map(|i| {
                let snapshot = SensorSnapshot::builder()
                    .reading(SensorKind::Humidity, 50.0)
                    .build();
                HistoryRecord::from_snapshot(start + chrono::Duration::days(i), &snapshot)
            })
            .collect();
        StubHistory {
            rows,
            ..StubHistory::default()
        }
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_on_health_check() {
        let response = get(harness().app(), "/health").await;

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn should_answer_ping_with_server_time() {
        let response = get(harness().app(), "/ping").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert!(body["time"].is_string());
    }

    #[tokio::test]
    async fn should_return_absent_sensor_readings_as_null() {
        let response = get(harness().app(), "/api/sensors").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["temperature_c"], 22.5);
        assert_eq!(body["soil_moisture_pct"], 41.0);
        assert!(body["light_lux"].is_null());
    }

    #[tokio::test]
    async fn should_return_last_rows_when_no_range_given() {
        let h = Harness::new(StubGateway::default(), history_rows(5));

        let response = get(h.app(), "/api/history?n=2").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["items"][0]["humidity_pct"], 50.0);
        assert_eq!(*h.history.queries.lock().unwrap(), vec!["recent"]);
    }

    #[tokio::test]
    async fn should_ignore_n_when_range_given() {
        let h = Harness::new(StubGateway::default(), history_rows(5));

        let response = get(h.app(), "/api/history?n=1&since=2000-01-01").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 5);
        assert_eq!(*h.history.queries.lock().unwrap(), vec!["between"]);
    }

    #[tokio::test]
    async fn should_treat_blank_dates_as_absent() {
        let h = Harness::new(StubGateway::default(), history_rows(3));

        let response = get(h.app(), "/api/history?since=&until=").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*h.history.queries.lock().unwrap(), vec!["recent"]);
    }

    #[tokio::test]
    async fn should_reject_malformed_date() {
        let response = get(harness().app(), "/api/history?since=yesterday").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn should_download_history_as_csv_attachment() {
        let h = Harness::new(StubGateway::default(), history_rows(2));

        let response = get(h.app(), "/api/history/download").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert!(
            response.headers()[header::CONTENT_DISPOSITION]
                .to_str()
                .unwrap()
                .contains("history.csv")
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp,"));
    }

    #[tokio::test]
    async fn should_download_header_only_when_history_empty() {
        let response = get(harness().app(), "/api/history/download").await;

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(String::from_utf8(bytes.to_vec()).unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn should_apply_manual_control_and_echo_clamped_request() {
        let h = harness();

        let response = post_json(
            h.app(),
            "/api/control",
            &serde_json::json!({ "pump": true, "pump_duration": 500, "light": false }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["echo"]["pump_duration"], 30);
        assert_eq!(
            *h.gateway.calls.lock().unwrap(),
            vec!["pump 30".to_string(), "light off".to_string()]
        );
    }

    #[tokio::test]
    async fn should_list_manual_action_after_control() {
        let h = harness();
        let app = h.app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/control")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"light":true,"brightness":40}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(app, "/api/actions?n=5").await;
        let body = body_json(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["kind"], "manual");
        assert_eq!(items[0]["detail"], "light:on(40%)");
    }

    #[tokio::test]
    async fn should_return_bad_gateway_when_actuator_fails() {
        let h = Harness::new(
            StubGateway {
                broken: true,
                ..StubGateway::default()
            },
            StubHistory::default(),
        );

        let response = post_json(h.app(), "/api/control", &serde_json::json!({ "pump": true })).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn should_return_current_settings() {
        let response = get(harness().app(), "/api/settings").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["log_interval_min"], 30);
        assert!(body["auto_control"].is_object());
    }

    #[tokio::test]
    async fn should_save_settings_patch() {
        let h = harness();

        let response = post_json(
            h.app(),
            "/api/settings",
            &serde_json::json!({
                "log_interval_min": 5,
                "auto_control": { "enabled": false }
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["saved"]["log_interval_min"], 5);
        assert!(!h.config.snapshot().enabled);
        assert_eq!(
            *h.schedule.intervals.lock().unwrap(),
            vec![Duration::from_secs(300)]
        );
        assert_eq!(h.store.saved.lock().unwrap().as_ref().unwrap().log_interval_min, 5);
    }
}
