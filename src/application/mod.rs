// Application layer - Use cases and ports
use crate::domain::dashboard::DashboardState;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod fault_service;
pub mod poll_service;
pub mod telemetry_api;

/// Handle to the dashboard state shared between the poll task, toggle
/// actions, and the terminal paint loop.
pub type SharedState = Arc<Mutex<DashboardState>>;
