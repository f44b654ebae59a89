// Poll loop use case - one refresh cycle per fixed tick
use crate::application::fault_service::FaultService;
use crate::application::telemetry_api::TelemetryApi;
use crate::application::SharedState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

/// Fixed refresh cadence of the dashboard.
pub const POLL_PERIOD: Duration = Duration::from_millis(300);

#[derive(Clone)]
pub struct PollService {
    api: Arc<dyn TelemetryApi>,
    state: SharedState,
    faults: FaultService,
}

impl PollService {
    pub fn new(api: Arc<dyn TelemetryApi>, state: SharedState) -> Self {
        let faults = FaultService::new(api.clone(), state.clone());
        Self { api, state, faults }
    }

    /// Run refresh cycles on the fixed cadence until the stop signal
    /// fires. The first cycle runs immediately; cycles never overlap, and
    /// the next tick is scheduled regardless of how the previous cycle
    /// went.
    pub async fn run(self, mut stop: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(POLL_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.refresh_cycle().await,
                _ = stop.changed() => break,
            }
        }
    }

    /// One full refresh: sample, then events, then the fault label. A
    /// failed sample fetch short-circuits the rest of the cycle.
    pub async fn refresh_cycle(&self) {
        let sample = match self.api.fetch_latest().await {
            Ok(sample) => sample,
            Err(err) => {
                tracing::warn!("sample fetch failed: {}", err);
                self.state.lock().await.mark_disconnected();
                return;
            }
        };

        let now = now_secs();
        self.state.lock().await.apply_sample(&sample, now);

        match self.api.fetch_events().await {
            Ok(events) => self.state.lock().await.apply_events(events),
            Err(err) => tracing::debug!("event fetch failed: {}", err),
        }

        self.faults.refresh_label().await;
    }
}

fn now_secs() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
