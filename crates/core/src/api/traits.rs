use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::chart::Chart;
use crate::models::envelope::PaginatedResponse;
use crate::models::query::ChartQuery;
use crate::models::request::{CalculateChartRequest, ChartUpdate};

/// The only point of contact with the charts backend.
///
/// Every call is one stateless round trip: no caching, no retries. The
/// views depend on this trait, so tests swap in an in-memory double.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ChartApi: Send + Sync {
    /// One page of charts. `query.sun_sign` is filtered server-side.
    async fn get_all_charts(&self, query: &ChartQuery) -> Result<PaginatedResponse<Chart>, CoreError>;

    async fn get_chart_by_id(&self, id: &str) -> Result<Chart, CoreError>;

    /// Submit birth data; the server computes and stores a new chart.
    async fn calculate_chart(&self, request: &CalculateChartRequest) -> Result<Chart, CoreError>;

    /// Apply a partial update and return the chart as the server now has it.
    async fn update_chart(&self, id: &str, update: &ChartUpdate) -> Result<Chart, CoreError>;

    async fn delete_chart(&self, id: &str) -> Result<(), CoreError>;

    /// Backend bootstrap call. The payload is opaque.
    async fn initialize_project(&self) -> Result<serde_json::Value, CoreError>;
}
