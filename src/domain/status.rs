// Reported status classification for display

/// Status string substituted when the backend sent none.
pub const STATUS_FALLBACK: &str = "INIT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Ok,
    Init,
    Fault,
}

impl DisplayStatus {
    /// Exact-match classification; anything unrecognized, including the
    /// empty string, is a fault.
    pub fn classify(status: &str) -> Self {
        match status {
            "OK" => DisplayStatus::Ok,
            "INIT" => DisplayStatus::Init,
            _ => DisplayStatus::Fault,
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            DisplayStatus::Ok => "Nominal telemetry",
            DisplayStatus::Init => "Waiting for telemetry…",
            DisplayStatus::Fault => "Fault detected",
        }
    }
}
