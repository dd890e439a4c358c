pub mod api;
pub mod errors;
pub mod models;
pub mod services;
pub mod views;

use api::http_client::HttpChartClient;
use api::traits::ChartApi;
use errors::CoreError;
use log::{info, warn};
use models::chart::Chart;
use models::settings::ClientSettings;
use std::sync::Arc;
use views::calculator::CalculatorView;
use views::listing::ListingView;

/// Main entry point for the Astro Charts core library.
///
/// Owns the configured API client and hands out view controllers. Views are
/// independent of each other: each owns its own state and shares only the
/// stateless client.
#[must_use]
pub struct AstroCharts {
    api: Arc<dyn ChartApi>,
    settings: ClientSettings,
}

impl std::fmt::Debug for AstroCharts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AstroCharts")
            .field("settings", &self.settings)
            .finish()
    }
}

impl AstroCharts {
    /// Build the HTTP client described by `settings`.
    pub fn connect(settings: ClientSettings) -> Result<Self, CoreError> {
        let client = HttpChartClient::new(&settings)?;
        info!("chart API at {}", settings.api_root());
        Ok(Self {
            api: Arc::new(client),
            settings,
        })
    }

    /// Use a caller-supplied API implementation (tests, alternate transports).
    pub fn with_api(api: Arc<dyn ChartApi>, settings: ClientSettings) -> Self {
        Self { api, settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn api(&self) -> Arc<dyn ChartApi> {
        Arc::clone(&self.api)
    }

    /// A fresh listing view. Call [`ListingView::load_charts`] on mount.
    pub fn listing(&self) -> ListingView {
        ListingView::new(self.api(), self.settings.page_size)
    }

    /// A fresh calculation view with an empty form.
    pub fn calculator(&self) -> CalculatorView {
        CalculatorView::new(self.api())
    }

    /// Fetch one chart by id.
    pub async fn get_chart(&self, id: &str) -> Result<Chart, CoreError> {
        self.api.get_chart_by_id(id).await
    }

    /// Run the backend bootstrap call.
    pub async fn initialize_project(&self) -> Result<serde_json::Value, CoreError> {
        match self.api.initialize_project().await {
            Ok(value) => {
                info!("project initialized");
                Ok(value)
            }
            Err(e) => {
                warn!("project initialization failed: {e}");
                Err(e)
            }
        }
    }
}
