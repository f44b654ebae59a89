// Connection health classification from sample staleness

/// A sample older than this is considered stale and the stand disconnected.
pub const STALE_AFTER_SECS: f64 = 2.0;

/// Age reported when no usable sample exists at all.
pub const AGE_UNKNOWN_SECS: f64 = 999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

impl ConnectionState {
    /// Connected iff the sample carried a timestamp and its age is under
    /// the staleness threshold. Recomputed every tick, no hysteresis.
    pub fn classify(ts: Option<f64>, now: f64) -> Self {
        match ts {
            Some(t) if now - t < STALE_AFTER_SECS => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }

    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }

    /// Indicator text: elapsed age with one decimal when connected, a fixed
    /// marker otherwise.
    pub fn indicator_text(self, age_secs: f64) -> String {
        match self {
            ConnectionState::Connected => format!("CONNECTED ({:.1}s)", age_secs),
            ConnectionState::Disconnected => "DISCONNECTED".to_string(),
        }
    }
}

/// Age of a sample relative to `now`. A missing timestamp counts as 0,
/// which yields a very large age for any realistic clock.
pub fn sample_age(ts: Option<f64>, now: f64) -> f64 {
    now - ts.unwrap_or(0.0)
}
