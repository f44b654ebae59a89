// HTTP adapter for the test-stand backend
use crate::application::telemetry_api::{ApiError, ApiResult, TelemetryApi};
use crate::domain::telemetry::{EventRecord, TelemetrySample};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Bound on any single backend round-trip so a black-holed connection
/// cannot stall the serialized poll cycle.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct HttpTelemetryApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SampleBody {
    #[serde(default)]
    ts: Option<f64>,
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
    #[serde(default)]
    vib: Option<f64>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventBody {
    ts: f64,
    msg: String,
}

#[derive(Debug, Deserialize)]
struct FaultBody {
    fault_mode: bool,
}

impl HttpTelemetryApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(self.url(path))
            .header("Cache-Control", "no-store")
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus(response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TelemetryApi for HttpTelemetryApi {
    async fn fetch_latest(&self) -> ApiResult<TelemetrySample> {
        let body: SampleBody = self.get_json("/latest").await?;
        Ok(TelemetrySample {
            ts: body.ts,
            temp: body.temp,
            pressure: body.pressure,
            vib: body.vib,
            status: body.status,
        })
    }

    async fn fetch_events(&self) -> ApiResult<Vec<EventRecord>> {
        let body: Vec<EventBody> = self.get_json("/events").await?;
        Ok(body
            .into_iter()
            .map(|e| EventRecord::new(e.ts, e.msg))
            .collect())
    }

    async fn fetch_fault_mode(&self) -> ApiResult<bool> {
        let body: FaultBody = self.get_json("/fault").await?;
        Ok(body.fault_mode)
    }

    async fn set_fault_mode(&self, enabled: bool) -> ApiResult<()> {
        let path = if enabled { "/fault/on" } else { "/fault/off" };
        let response = self
            .client
            .post(self.url(path))
            .header("Cache-Control", "no-store")
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus(response.status().as_u16()));
        }

        Ok(())
    }
}
