// Fault-injection toggle use case
use crate::application::telemetry_api::TelemetryApi;
use crate::application::SharedState;
use std::sync::Arc;

#[derive(Clone)]
pub struct FaultService {
    api: Arc<dyn TelemetryApi>,
    state: SharedState,
}

impl FaultService {
    pub fn new(api: Arc<dyn TelemetryApi>, state: SharedState) -> Self {
        Self { api, state }
    }

    /// Enable or disable remote fault injection, then redisplay from a
    /// fresh read regardless of how the write went. No optimistic update.
    pub async fn set_fault(&self, enabled: bool) {
        if let Err(err) = self.api.set_fault_mode(enabled).await {
            tracing::warn!("fault toggle failed: {}", err);
        }
        self.refresh_label().await;
    }

    /// Re-read the remote flag and publish it; a failed read publishes the
    /// unknown marker.
    pub async fn refresh_label(&self) {
        let mode = match self.api.fetch_fault_mode().await {
            Ok(on) => Some(on),
            Err(err) => {
                tracing::debug!("fault-mode read failed: {}", err);
                None
            }
        };
        self.state.lock().await.set_fault_mode(mode);
    }
}
