// Analog gauge mapping for the temperature dial

/// Temperature span of the dial face in °C.
pub const GAUGE_MAX_TEMP_C: f64 = 120.0;

const AMBER_FROM_C: f64 = 70.0;
const RED_FROM_C: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeBand {
    Green,
    Amber,
    Red,
}

impl GaugeBand {
    pub fn for_temp(temp_c: f64) -> Self {
        let t = temp_c.clamp(0.0, GAUGE_MAX_TEMP_C);
        if t < AMBER_FROM_C {
            GaugeBand::Green
        } else if t < RED_FROM_C {
            GaugeBand::Amber
        } else {
            GaugeBand::Red
        }
    }
}

/// View-ready projection of a temperature onto the dial: needle angle,
/// proportional fill, and color band. Pure function of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReading {
    pub angle_deg: f64,
    pub fill_pct: f64,
    pub band: GaugeBand,
}

impl GaugeReading {
    /// 0 °C maps to 180° (left of the dial), 120 °C to 360° (right),
    /// sweeping through the bottom; input clamps to [0, 120].
    pub fn from_temp(temp_c: f64) -> Self {
        let t = temp_c.clamp(0.0, GAUGE_MAX_TEMP_C);
        Self {
            angle_deg: 180.0 + (t / GAUGE_MAX_TEMP_C) * 180.0,
            fill_pct: (t / GAUGE_MAX_TEMP_C) * 100.0,
            band: GaugeBand::for_temp(t),
        }
    }
}
