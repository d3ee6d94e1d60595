//! Error types for the Itaú client.
//!
//! Every failed exchange surfaces as one of two kinds carrying a
//! `(message, code)` pair: [`AuthError`] while obtaining a token and
//! [`ApiError`] while performing a business request. Local configuration
//! problems are reported separately as [`InvalidInputError`].

use thiserror::Error;

/// Code used for failures reported by the API itself (HTTP >= 400 or an
/// `error` field in the payload), as opposed to HTTP-status codes.
pub const LOGIC_ERROR_CODE: u16 = 100;

/// The unified error type for Itaú client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Token acquisition failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A business request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local configuration is invalid (URLs, certificate files).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the normalized error code, if this is an exchange failure.
    pub fn code(&self) -> Option<u16> {
        match self {
            Error::Auth(e) => Some(e.code),
            Error::Api(e) => Some(e.code),
            Error::InvalidInput(_) => None,
        }
    }
}

/// Failure while obtaining a bearer token from the auth endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct AuthError {
    /// Message reported by the API, or a diagnostic.
    pub message: String,
    /// [`LOGIC_ERROR_CODE`] or the HTTP status of the response.
    pub code: u16,
}

impl AuthError {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// Failure while performing a business request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct ApiError {
    /// Raw response body, API-reported description, or a diagnostic.
    pub message: String,
    /// [`LOGIC_ERROR_CODE`] or the HTTP status of the response.
    pub code: u16,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API or auth URL.
    #[error("invalid URL '{value}': {reason}")]
    Url { value: String, reason: String },

    /// Certificate or key file could not be loaded.
    #[error("invalid certificate '{path}': {reason}")]
    Certificate { path: String, reason: String },

    /// Unknown HTTP method name.
    #[error("unsupported HTTP method '{0}'")]
    Method(String),

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_and_code() {
        let err = Error::from(ApiError::new("saldo insuficiente", LOGIC_ERROR_CODE));
        assert_eq!(err.to_string(), "API error: saldo insuficiente (code 100)");
        assert_eq!(err.code(), Some(100));
    }

    #[test]
    fn invalid_input_has_no_code() {
        let err = Error::from(InvalidInputError::Method("PATCH".into()));
        assert_eq!(err.code(), None);
    }
}
