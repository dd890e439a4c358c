// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, user messages
// ═══════════════════════════════════════════════════════════════════

use astro_charts_core::api::http_client::HttpChartClient;
use astro_charts_core::api::traits::ChartApi;
use astro_charts_core::errors::CoreError;
use astro_charts_core::models::envelope::FieldError;
use astro_charts_core::models::query::ChartQuery;
use astro_charts_core::models::settings::ClientSettings;
use astro_charts_core::models::zodiac::ZodiacSign;

fn field(msg: &str) -> FieldError {
    FieldError {
        msg: msg.to_string(),
        param: None,
        path: None,
    }
}

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("missing field `_id`".into());
        assert_eq!(err.to_string(), "Deserialization error: missing field `_id`");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            status: 404,
            message: "Chart not found".into(),
        };
        assert_eq!(err.to_string(), "API error (404): Chart not found");
    }

    #[test]
    fn validation_shows_first_field_error() {
        let err = CoreError::Validation {
            status: 400,
            message: Some("Validation failed".into()),
            errors: vec![field("Invalid date"), field("Invalid time")],
        };
        assert_eq!(err.to_string(), "Validation failed (400): Invalid date");
    }

    #[test]
    fn invalid_form() {
        let err = CoreError::InvalidForm("Chart name is required".into());
        assert_eq!(err.to_string(), "Invalid input: Chart name is required");
    }

    #[test]
    fn invalid_config() {
        let err = CoreError::InvalidConfig("page_size must be at least 1".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: page_size must be at least 1"
        );
    }
}

// ── user_message priority ───────────────────────────────────────────

mod user_message {
    use super::*;

    #[test]
    fn field_error_beats_top_level_error() {
        let err = CoreError::Validation {
            status: 422,
            message: Some("Validation failed".into()),
            errors: vec![field("Birth location is required")],
        };
        assert_eq!(err.user_message(), "Birth location is required");
    }

    #[test]
    fn empty_field_messages_skipped() {
        let err = CoreError::Validation {
            status: 422,
            message: Some("Validation failed".into()),
            errors: vec![field(""), field("Second")],
        };
        assert_eq!(err.user_message(), "Second");
    }

    #[test]
    fn top_level_used_when_no_field_text() {
        let err = CoreError::Validation {
            status: 422,
            message: Some("Validation failed".into()),
            errors: vec![field("")],
        };
        assert_eq!(err.user_message(), "Validation failed");
    }

    #[test]
    fn server_error_string_verbatim() {
        let err = CoreError::Api {
            status: 400,
            message: "Location not found".into(),
        };
        assert_eq!(err.user_message(), "Location not found");
    }

    #[test]
    fn transport_message_last() {
        let err = CoreError::Network("dns error".into());
        assert_eq!(err.user_message(), "dns error");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn fallback_only_when_blank() {
        let blank = CoreError::Api {
            status: 500,
            message: "  ".into(),
        };
        assert_eq!(blank.user_message_or("Failed to delete chart"), "Failed to delete chart");

        let filled = CoreError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(filled.user_message_or("Failed to delete chart"), "boom");
        assert_eq!(filled.status(), Some(500));
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts() {
        fn parse() -> Result<serde_json::Value, CoreError> {
            Ok(serde_json::from_str("[1, 2")?)
        }
        assert!(matches!(parse(), Err(CoreError::Deserialization(_))));
    }

    #[tokio::test]
    async fn transport_failure_leaves_request_url_out() {
        // Nothing listens on port 1, so the connection is refused.
        let client = HttpChartClient::new(&ClientSettings {
            base_url: "http://127.0.0.1:1/api".into(),
            timeout_secs: 5,
            ..ClientSettings::default()
        })
        .unwrap();
        let query = ChartQuery {
            sun_sign: Some(ZodiacSign::Leo),
            ..ChartQuery::default()
        };

        match client.get_all_charts(&query).await.unwrap_err() {
            CoreError::Network(msg) => {
                assert!(!msg.trim().is_empty());
                assert!(!msg.contains("sunSign"));
                assert!(!msg.contains("127.0.0.1"));
                assert_eq!(msg.matches('(').count(), msg.matches(')').count());
            }
            other => panic!("expected Network, got {other:?}"),
        }
    }
}
