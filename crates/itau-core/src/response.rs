//! Response classification.
//!
//! Token and business requests share one protocol for turning an HTTP
//! outcome into either a decoded payload or a `(message, code)` failure:
//!
//! 1. status >= 400 fails with the raw body as message and [`LOGIC_ERROR_CODE`];
//! 2. status 204 succeeds with `{"status_code": 204}` without reading a body;
//! 3. a missing or empty body fails with `"Empty response, ..."` and the status;
//! 4. a JSON object carrying an `error` key fails with its `error_description`;
//! 5. anything else is returned as decoded.

use serde_json::{Value, json};

use crate::error::{ApiError, AuthError, LOGIC_ERROR_CODE};

/// Status reported as the error code when no HTTP response was received.
pub const NO_STATUS: u16 = 0;

/// Raw outcome of one HTTP exchange, before classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status, if a response was received.
    pub status: Option<u16>,
    /// Response body, if one could be read.
    pub body: Option<String>,
    /// Low-level transport error text, kept for the error message.
    pub diagnostic: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            body: Some(body.into()),
            diagnostic: None,
        }
    }

    /// An exchange that never produced a response.
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            status: None,
            body: None,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Classify this outcome into a payload or a [`Rejection`].
    pub fn classify(self) -> Result<Value, Rejection> {
        let status = self.status.unwrap_or(NO_STATUS);

        if status >= 400 {
            return Err(Rejection::new(self.body.unwrap_or_default(), LOGIC_ERROR_CODE));
        }

        if status == 204 {
            return Ok(json!({ "status_code": 204 }));
        }

        let body = match self.body {
            Some(body) if !body.trim().is_empty() => body,
            _ => {
                let diagnostic = self
                    .diagnostic
                    .unwrap_or_else(|| "no transport error reported".to_string());
                return Err(Rejection::new(
                    format!("Empty response, {}", diagnostic),
                    status,
                ));
            }
        };

        let decoded: Value = serde_json::from_str(&body)
            .map_err(|e| Rejection::new(format!("Invalid JSON response: {}", e), status))?;

        if let Some(error) = decoded.as_object().and_then(|o| o.get("error")) {
            let message = decoded
                .get("error_description")
                .filter(|d| !d.is_null())
                .map(text_of)
                .unwrap_or_else(|| text_of(error));
            return Err(Rejection::new(message, LOGIC_ERROR_CODE));
        }

        Ok(decoded)
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A classified failure, not yet attributed to the auth or API phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub message: String,
    pub code: u16,
}

impl Rejection {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

impl From<Rejection> for AuthError {
    fn from(r: Rejection) -> Self {
        AuthError::new(r.message, r.code)
    }
}

impl From<Rejection> for ApiError {
    fn from(r: Rejection) -> Self {
        ApiError::new(r.message, r.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_error_surfaces_raw_body() {
        let raw = RawResponse::new(422, "<html>not json</html>");
        assert_eq!(
            raw.classify().unwrap_err(),
            Rejection::new("<html>not json</html>", 100)
        );
    }

    #[test]
    fn server_error_with_json_body_still_uses_raw_text() {
        let body = r#"{"error":"server_error","error_description":"boom"}"#;
        let err = RawResponse::new(503, body).classify().unwrap_err();
        assert_eq!(err.message, body);
        assert_eq!(err.code, 100);
    }

    #[test]
    fn no_content_ignores_body() {
        let raw = RawResponse::new(204, "garbage that is not json");
        assert_eq!(raw.classify().unwrap(), json!({"status_code": 204}));

        let raw = RawResponse {
            status: Some(204),
            ..Default::default()
        };
        assert_eq!(raw.classify().unwrap(), json!({"status_code": 204}));
    }

    #[test]
    fn empty_body_reports_status_as_code() {
        let err = RawResponse::new(200, "").classify().unwrap_err();
        assert_eq!(err.code, 200);
        assert!(err.message.starts_with("Empty response, "));
    }

    #[test]
    fn transport_failure_includes_diagnostic() {
        let err = RawResponse::failed("connection refused").classify().unwrap_err();
        assert_eq!(err.code, NO_STATUS);
        assert_eq!(err.message, "Empty response, connection refused");
    }

    #[test]
    fn logical_error_inside_success_response() {
        let raw = RawResponse::new(
            200,
            r#"{"error":"invalid_client","error_description":"X"}"#,
        );
        assert_eq!(raw.classify().unwrap_err(), Rejection::new("X", 100));
    }

    #[test]
    fn logical_error_without_description_uses_error_value() {
        let raw = RawResponse::new(200, r#"{"error":"invalid_client"}"#);
        assert_eq!(raw.classify().unwrap_err().message, "invalid_client");
    }

    #[test]
    fn payload_returned_verbatim() {
        let raw = RawResponse::new(201, r#"{"txid":"abc","valor":{"original":"1.00"}}"#);
        assert_eq!(
            raw.classify().unwrap(),
            json!({"txid": "abc", "valor": {"original": "1.00"}})
        );
    }

    #[test]
    fn array_payload_with_error_lookalike_is_not_an_error() {
        let raw = RawResponse::new(200, r#"[{"error":"x"}]"#);
        assert!(raw.classify().is_ok());
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = RawResponse::new(200, "not json").classify().unwrap_err();
        assert_eq!(err.code, 200);
        assert!(err.message.starts_with("Invalid JSON response"));
    }

    #[test]
    fn rejection_converts_to_both_kinds() {
        let auth: AuthError = Rejection::new("denied", 100).into();
        let api: ApiError = Rejection::new("denied", 100).into();
        assert_eq!(auth.message, api.message);
        assert_eq!(auth.code, api.code);
    }
}
