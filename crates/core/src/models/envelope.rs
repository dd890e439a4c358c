use serde::{Deserialize, Serialize};

/// The uniform `{success, data}` wrapper around single-value payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One page of a listing plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Vec<T>,
    /// Items in this page.
    pub count: u32,
    /// Items across all pages.
    pub total: u32,
    /// 1-based page number.
    pub page: u32,
    /// Total page count.
    pub pages: u32,
}

fn default_success() -> bool {
    true
}

impl<T> PaginatedResponse<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Failure body: `{success:false, error}` or `{error, errors:[{msg}]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}
