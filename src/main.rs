// Main entry point - Dependency injection and dashboard setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::application::fault_service::FaultService;
use crate::application::poll_service::PollService;
use crate::application::SharedState;
use crate::domain::dashboard::DashboardState;
use crate::infrastructure::config::load_monitor_config;
use crate::infrastructure::http_api::HttpTelemetryApi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so the alternate screen stays
    // intact (redirect stderr to a file to capture them)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = load_monitor_config()?;

    // Create backend adapter (infrastructure layer)
    let api = Arc::new(HttpTelemetryApi::new(config.backend.base_url));

    // Create shared display state and services (application layer)
    let state: SharedState = Arc::new(Mutex::new(DashboardState::new()));
    let poll_service = PollService::new(api.clone(), state.clone());
    let fault_service = FaultService::new(api, state.clone());

    // Start the poll loop with a stop handle for teardown
    let (stop_tx, stop_rx) = watch::channel(false);
    let poll_task = tokio::spawn(poll_service.run(stop_rx));

    // Run the terminal dashboard (presentation layer)
    let result = presentation::app::run(state, fault_service).await;

    // Stop the poll loop before reporting how the UI ended
    let _ = stop_tx.send(true);
    let _ = poll_task.await;

    result
}
