use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::ChartApi;
use crate::errors::CoreError;
use crate::models::chart::Chart;
use crate::models::envelope::{ApiResponse, ErrorEnvelope, PaginatedResponse};
use crate::models::query::ChartQuery;
use crate::models::request::{CalculateChartRequest, ChartUpdate};
use crate::models::settings::ClientSettings;

/// reqwest-backed [`ChartApi`] talking to the REST backend.
///
/// Endpoints (relative to `base_url`):
/// - `GET /charts?page&limit&sortBy&sortOrder[&sunSign]`
/// - `GET|PUT|DELETE /charts/{id}`
/// - `POST /charts/calculate`
/// - `GET /init`
pub struct HttpChartClient {
    client: Client,
    root: String,
}

impl HttpChartClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout_secs));
        let client = builder.build()?;
        Ok(Self {
            client,
            root: settings.api_root().to_string(),
        })
    }

    /// Full listing URL for `query`.
    pub fn charts_url(&self, query: &ChartQuery) -> Result<Url, CoreError> {
        let base = format!("{}/charts", self.root);
        Url::parse_with_params(&base, query.to_pairs())
            .map_err(|e| CoreError::InvalidConfig(format!("{base}: {e}")))
    }

    /// URL of a single chart; the id is percent-encoded as one path segment.
    pub fn chart_url(&self, id: &str) -> Result<Url, CoreError> {
        let mut url = self.endpoint("charts")?;
        url.path_segments_mut()
            .map_err(|_| CoreError::InvalidConfig(format!("{} cannot take a path", self.root)))?
            .push(id);
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, CoreError> {
        let raw = format!("{}/{path}", self.root);
        Url::parse(&raw).map_err(|e| CoreError::InvalidConfig(format!("{raw}: {e}")))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, CoreError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

// ── Envelope decoding ───────────────────────────────────────────────

/// Decode a response body into its envelope type, or into the matching
/// [`CoreError`] when the status or the `success` flag reports a failure.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, CoreError> {
    if !(200..300).contains(&status) {
        return Err(decode_error(status, body));
    }

    let value: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body)?
    };

    if value.get("success").and_then(|s| s.as_bool()) == Some(false) {
        return Err(decode_error(status, body));
    }

    Ok(serde_json::from_value(value)?)
}

/// Turn a failure body into a [`CoreError`]. Field errors win over the
/// top-level message; a body that is not an error envelope falls back to the
/// HTTP reason phrase.
pub fn decode_error(status: u16, body: &str) -> CoreError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = envelope
        .error
        .or(envelope.message)
        .filter(|m| !m.trim().is_empty());

    if !envelope.errors.is_empty() {
        return CoreError::Validation {
            status,
            message,
            errors: envelope.errors,
        };
    }

    let message = message.unwrap_or_else(|| {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(|reason| format!("Request failed: {status} {reason}"))
            .unwrap_or_else(|| format!("Request failed with status {status}"))
    });
    CoreError::Api { status, message }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ChartApi for HttpChartClient {
    async fn get_all_charts(&self, query: &ChartQuery) -> Result<PaginatedResponse<Chart>, CoreError> {
        let url = self.charts_url(query)?;
        debug!("GET {}", url.path());
        self.execute(self.client.get(url)).await
    }

    async fn get_chart_by_id(&self, id: &str) -> Result<Chart, CoreError> {
        let url = self.chart_url(id)?;
        debug!("GET {}", url.path());
        let resp: ApiResponse<Chart> = self.execute(self.client.get(url)).await?;
        Ok(resp.data)
    }

    async fn calculate_chart(&self, request: &CalculateChartRequest) -> Result<Chart, CoreError> {
        let url = self.endpoint("charts/calculate")?;
        debug!("POST {}", url.path());
        let resp: ApiResponse<Chart> = self.execute(self.client.post(url).json(request)).await?;
        Ok(resp.data)
    }

    async fn update_chart(&self, id: &str, update: &ChartUpdate) -> Result<Chart, CoreError> {
        let url = self.chart_url(id)?;
        debug!("PUT {}", url.path());
        let resp: ApiResponse<Chart> = self.execute(self.client.put(url).json(update)).await?;
        Ok(resp.data)
    }

    async fn delete_chart(&self, id: &str) -> Result<(), CoreError> {
        let url = self.chart_url(id)?;
        debug!("DELETE {}", url.path());
        let _: Option<ApiResponse<Option<serde_json::Value>>> =
            self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    async fn initialize_project(&self) -> Result<serde_json::Value, CoreError> {
        let url = self.endpoint("init")?;
        debug!("GET {}", url.path());
        self.execute(self.client.get(url)).await
    }
}
