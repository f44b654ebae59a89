// Telemetry data domain models

/// One reading from the test stand. Fields the backend omitted arrive as
/// `None`; numeric coercion happens when the reading is applied to the
/// dashboard state.
#[derive(Debug, Clone, Default)]
pub struct TelemetrySample {
    pub ts: Option<f64>,
    pub temp: Option<f64>,
    pub pressure: Option<f64>,
    pub vib: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub t: f64,
    pub temp: f64,
    pub press: f64,
}

impl ChartPoint {
    pub fn new(t: f64, temp: f64, press: f64) -> Self {
        Self { t, temp, press }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub ts: f64,
    pub msg: String,
}

impl EventRecord {
    pub fn new(ts: f64, msg: String) -> Self {
        Self { ts, msg }
    }
}

/// Format a numeric readout with two decimals, or a dash when the value is
/// not finite.
pub fn format_reading(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "—".to_string()
    }
}

/// Value fed into the gauge and chart mappings: the reading itself when
/// finite, otherwise 0 so the visual pipeline never sees NaN or infinity.
pub fn safe_value(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
