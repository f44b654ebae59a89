// Dashboard display state, recomputed by the poll cycle each tick
use super::chart::ChartBuffer;
use super::connection::{sample_age, AGE_UNKNOWN_SECS, ConnectionState};
use super::gauge::GaugeReading;
use super::status::{DisplayStatus, STATUS_FALLBACK};
use super::telemetry::{safe_value, ChartPoint, EventRecord, TelemetrySample};
use chrono::{DateTime, Local};

/// Everything the terminal paints, owned behind one shared handle. The
/// poll cycle is the only writer for telemetry-driven fields; the fault
/// label is also written by toggle actions.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub connection: ConnectionState,
    pub age_secs: f64,
    pub temp: f64,
    pub pressure: f64,
    pub vib: f64,
    pub status_text: String,
    pub status: DisplayStatus,
    pub gauge: GaugeReading,
    pub history: ChartBuffer,
    pub events: Vec<EventRecord>,
    pub fault_mode: Option<bool>,
    pub packet_count: u64,
    pub last_packet_at: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            age_secs: AGE_UNKNOWN_SECS,
            temp: f64::NAN,
            pressure: f64::NAN,
            vib: f64::NAN,
            status_text: STATUS_FALLBACK.to_string(),
            status: DisplayStatus::Init,
            gauge: GaugeReading::from_temp(0.0),
            history: ChartBuffer::new(),
            events: Vec::new(),
            fault_mode: None,
            packet_count: 0,
            last_packet_at: None,
        }
    }

    /// Apply one fetched sample. Readouts, status, and gauge update
    /// unconditionally; the packet counter and history only advance for a
    /// connected (fresh) sample.
    pub fn apply_sample(&mut self, sample: &TelemetrySample, now: f64) {
        self.age_secs = sample_age(sample.ts, now);
        self.connection = ConnectionState::classify(sample.ts, now);
        self.last_packet_at = sample
            .ts
            .filter(|ts| ts.is_finite() && *ts != 0.0)
            .and_then(local_time_from_secs);

        let temp = sample.temp.unwrap_or(0.0);
        let pressure = sample.pressure.unwrap_or(0.0);
        self.temp = temp;
        self.pressure = pressure;
        self.vib = sample.vib.unwrap_or(0.0);

        let status = sample
            .status
            .clone()
            .unwrap_or_else(|| STATUS_FALLBACK.to_string());
        self.status = DisplayStatus::classify(&status);
        self.status_text = status;

        self.gauge = GaugeReading::from_temp(safe_value(temp));

        if self.connection.is_connected() {
            self.packet_count += 1;
            self.history
                .push(ChartPoint::new(now, safe_value(temp), safe_value(pressure)));
        }
    }

    /// Sample fetch failed: only the connection indicator changes, every
    /// other widget keeps its last rendered value.
    pub fn mark_disconnected(&mut self) {
        self.connection = ConnectionState::Disconnected;
        self.age_secs = AGE_UNKNOWN_SECS;
    }

    /// Replace the event log wholesale with a freshly fetched list.
    pub fn apply_events(&mut self, events: Vec<EventRecord>) {
        self.events = events;
    }

    /// Publish a fresh fault-mode read; `None` means the read failed and
    /// the label shows the unknown marker.
    pub fn set_fault_mode(&mut self, mode: Option<bool>) {
        self.fault_mode = mode;
    }
}

fn local_time_from_secs(ts: f64) -> Option<DateTime<Local>> {
    DateTime::from_timestamp_millis((ts * 1000.0) as i64)
        .map(|utc| utc.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_700_000_000.0;

    fn fresh_sample() -> TelemetrySample {
        TelemetrySample {
            ts: Some(NOW),
            temp: Some(50.0),
            pressure: Some(8.0),
            vib: Some(0.1),
            status: Some("OK".to_string()),
        }
    }

    #[test]
    fn test_connected_sample_advances_everything() {
        let mut state = DashboardState::new();
        state.apply_sample(&fresh_sample(), NOW);

        assert_eq!(state.connection, ConnectionState::Connected);
        assert_eq!(state.packet_count, 1);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.status, DisplayStatus::Ok);
        assert_eq!(state.status_text, "OK");
        assert_eq!(state.gauge.angle_deg, 255.0);
        assert!(state.last_packet_at.is_some());
    }

    #[test]
    fn test_long_run_fills_window_and_counts_every_packet() {
        let mut state = DashboardState::new();
        for _ in 0..241 {
            state.apply_sample(&fresh_sample(), NOW);
        }
        assert_eq!(state.packet_count, 241);
        assert_eq!(state.history.len(), 240);
        assert_eq!(state.connection, ConnectionState::Connected);
    }

    #[test]
    fn test_stale_sample_updates_readouts_only() {
        let mut state = DashboardState::new();
        let mut sample = fresh_sample();
        sample.ts = Some(NOW - 5.0);
        state.apply_sample(&sample, NOW);

        assert_eq!(state.connection, ConnectionState::Disconnected);
        assert_eq!(state.packet_count, 0);
        assert!(state.history.is_empty());
        // The stale values still reach the display surface.
        assert_eq!(state.temp, 50.0);
        assert_eq!(state.status, DisplayStatus::Ok);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let mut state = DashboardState::new();
        state.apply_sample(&TelemetrySample::default(), NOW);

        assert_eq!(state.connection, ConnectionState::Disconnected);
        assert_eq!(state.age_secs, NOW);
        assert_eq!(state.temp, 0.0);
        assert_eq!(state.status_text, "INIT");
        assert_eq!(state.status, DisplayStatus::Init);
        assert!(state.last_packet_at.is_none());
    }

    #[test]
    fn test_empty_status_is_a_fault() {
        let mut state = DashboardState::new();
        let mut sample = fresh_sample();
        sample.status = Some(String::new());
        state.apply_sample(&sample, NOW);
        assert_eq!(state.status, DisplayStatus::Fault);
    }

    #[test]
    fn test_non_finite_reading_feeds_zero_into_visuals() {
        let mut state = DashboardState::new();
        let mut sample = fresh_sample();
        sample.temp = Some(f64::INFINITY);
        state.apply_sample(&sample, NOW);

        // Raw value kept for the dash sentinel, visuals get 0.
        assert!(state.temp.is_infinite());
        assert_eq!(state.gauge.angle_deg, 180.0);
        assert_eq!(state.history.last().map(|p| p.temp), Some(0.0));
    }

    #[test]
    fn test_fetch_failure_preserves_progress() {
        let mut state = DashboardState::new();
        for _ in 0..3 {
            state.apply_sample(&fresh_sample(), NOW);
        }
        state.mark_disconnected();

        assert_eq!(state.connection, ConnectionState::Disconnected);
        assert_eq!(state.age_secs, AGE_UNKNOWN_SECS);
        assert_eq!(state.packet_count, 3);
        assert_eq!(state.history.len(), 3);
    }

    #[test]
    fn test_events_replace_not_merge() {
        let mut state = DashboardState::new();
        state.apply_events(vec![
            EventRecord::new(NOW, "FAULT: OVERTEMP".to_string()),
            EventRecord::new(NOW + 1.0, "RECOVERED: OK".to_string()),
        ]);
        state.apply_events(vec![EventRecord::new(
            NOW + 2.0,
            "FAULT: VIBRATION".to_string(),
        )]);

        assert_eq!(state.events.len(), 1);
        assert_eq!(state.events[0].msg, "FAULT: VIBRATION");
    }
}
