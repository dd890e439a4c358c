use thiserror::Error;

use crate::models::envelope::FieldError;

/// Unified error type for the entire astro-charts-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Transport ───────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Server ──────────────────────────────────────────────────────
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Validation failed ({status}): {}", first_message(.errors, .message))]
    Validation {
        status: u16,
        message: Option<String>,
        errors: Vec<FieldError>,
    },

    // ── Client ──────────────────────────────────────────────────────
    #[error("Invalid input: {0}")]
    InvalidForm(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// The message a view shows inline for this failure.
    ///
    /// Priority: first field-level error, then the server's `error` string,
    /// then the transport/decoding message.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation {
                errors, message, ..
            } => first_message(errors, message),
            CoreError::Api { message, .. } => message.clone(),
            CoreError::Network(msg)
            | CoreError::Deserialization(msg)
            | CoreError::InvalidForm(msg)
            | CoreError::InvalidConfig(msg) => msg.clone(),
        }
    }

    /// Like [`user_message`](Self::user_message), but substitutes `fallback`
    /// when the failure carried no text at all.
    pub fn user_message_or(&self, fallback: &str) -> String {
        let msg = self.user_message();
        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg
        }
    }

    /// HTTP status of a server-side failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Api { status, .. } | CoreError::Validation { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn first_message(errors: &[FieldError], message: &Option<String>) -> String {
    errors
        .iter()
        .map(|e| e.msg.as_str())
        .find(|m| !m.is_empty())
        .or(message.as_deref())
        .unwrap_or_default()
        .to_string()
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Listing URLs carry filter values in the query; report the failure
        // without the URL.
        CoreError::Network(e.without_url().to_string())
    }
}
