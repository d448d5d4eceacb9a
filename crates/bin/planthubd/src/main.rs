//! # planthubd: planthub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Load operator settings from the settings file
//! - Start the history recorder and the auto-control loop
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT): stop both timers, then
//!   release the actuators
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;
mod settings_file;

use std::sync::Arc;

use anyhow::Context;
use planthub_adapter_http_axum::state::AppState;
use planthub_adapter_storage_sqlite_sqlx::{SqliteActionLog, SqliteHistoryLog};
use planthub_adapter_virtual::{VirtualActuators, VirtualSensors};
use planthub_app::config_cell::ConfigCell;
use planthub_app::controller::{CONTROL_INTERVAL, Controller};
use planthub_app::ports::SettingsStore;
use planthub_app::recorder::Recorder;
use planthub_app::scheduler::Scheduler;
use planthub_app::services::{ControlService, SettingsService};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::settings_file::TomlSettingsStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load planthub.toml")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Database
    let db = planthub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to open the database")?;
    let history_log = SqliteHistoryLog::new(db.pool().clone());
    let action_log = SqliteActionLog::new(db.pool().clone());

    // Hardware
    let sensors = VirtualSensors::new(&config.virtual_devices);
    let actuators = VirtualActuators::new();

    // Settings
    let store = TomlSettingsStore::new(config.settings.path.clone());
    let settings = store
        .load()
        .await
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    let auto_control = Arc::new(ConfigCell::new(settings.auto_control.clone()));

    // Timers
    let controller = Controller::new(
        sensors.clone(),
        actuators.clone(),
        action_log.clone(),
        Arc::clone(&auto_control),
    );
    let recorder = Recorder::new(sensors.clone(), history_log.clone());
    let scheduler = Arc::new(Scheduler::start(
        recorder,
        settings.recorder_interval(),
        controller,
        CONTROL_INTERVAL,
    ));

    // Services
    let settings_service =
        SettingsService::new(store, Arc::clone(&scheduler), auto_control, settings);
    let control_service = ControlService::new(actuators.clone(), action_log);

    // HTTP
    let state = AppState::new(sensors, history_log, control_service, settings_service);
    let app = planthub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "planthubd listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // timers first, so no tick drives hardware that is being released
    scheduler.shutdown().await;
    actuators.release();
    db.close().await;
    tracing::info!("planthubd stopped");

    served.context("http server failed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
