use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Client configuration. Missing keys fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Absolute API root, including the `/api` prefix.
    pub base_url: String,

    /// Charts requested per listing page.
    pub page_size: u32,

    /// Per-request timeout (native targets only).
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            page_size: 10,
            timeout_secs: 30,
        }
    }
}

impl ClientSettings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: ClientSettings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidConfig(format!("settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page_size == 0 {
            return Err(CoreError::InvalidConfig("page_size must be at least 1".into()));
        }
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(CoreError::InvalidConfig("base_url must not be empty".into()));
        }
        reqwest::Url::parse(base)
            .map_err(|e| CoreError::InvalidConfig(format!("base_url {base:?}: {e}")))?;
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn api_root(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}
