use serde::{Deserialize, Serialize};

/// Birth data submitted for server-side chart calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateChartRequest {
    /// `YYYY-MM-DD`
    pub birth_date: String,
    /// `HH:MM`, 24-hour
    pub birth_time: String,
    pub birth_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl CalculateChartRequest {
    pub fn new(
        birth_date: impl Into<String>,
        birth_time: impl Into<String>,
        birth_location: impl Into<String>,
    ) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: birth_time.into(),
            birth_location: birth_location.into(),
            ..Self::default()
        }
    }
}

/// Partial update body for `PUT /charts/{id}`. Absent fields are left
/// untouched by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}
