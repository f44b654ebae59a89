// Port and error types for the test-stand backend
use crate::domain::telemetry::{EventRecord, TelemetrySample};
use async_trait::async_trait;
use thiserror::Error;

/// Failure classes the poll cycle recovers from locally. Missing fields
/// and non-finite values are not errors at this level; they are handled by
/// substitution when the decoded payload is applied.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("backend returned status {0}")]
    BadStatus(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait TelemetryApi: Send + Sync {
    /// Latest telemetry sample from the stand.
    async fn fetch_latest(&self) -> ApiResult<TelemetrySample>;

    /// Recent event history, oldest first; replaces the log wholesale.
    async fn fetch_events(&self) -> ApiResult<Vec<EventRecord>>;

    /// Current remote fault-injection flag.
    async fn fetch_fault_mode(&self) -> ApiResult<bool>;

    /// Request a fault-mode change. Callers re-read the flag afterwards
    /// rather than trusting the write.
    async fn set_fault_mode(&self, enabled: bool) -> ApiResult<()>;
}
