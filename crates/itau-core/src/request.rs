//! Request envelope types.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Header carrying the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-itau-correlationID";

/// Header carrying the flow id on token requests.
pub const FLOW_ID_HEADER: &str = "x-itau-flowID";

/// Content type sent with business requests.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP verbs accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            _ => Err(InvalidInputError::Method(s.to_string()).into()),
        }
    }
}

/// A request body: either a JSON value serialized on send, or a string sent
/// as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Raw(String),
}

impl Body {
    /// Whether this body should be sent at all.
    ///
    /// `null`, `false`, zero, `""`, `"0"` and empty arrays or objects count
    /// as no body.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Json(Value::Null) => true,
            Body::Json(Value::Bool(b)) => !b,
            Body::Json(Value::Number(n)) => n.as_f64() == Some(0.0),
            Body::Json(Value::String(s)) | Body::Raw(s) => is_blank_text(s),
            Body::Json(Value::Array(a)) => a.is_empty(),
            Body::Json(Value::Object(o)) => o.is_empty(),
        }
    }

    /// The wire payload, or `None` when the body is empty.
    pub fn into_payload(self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        match self {
            Body::Json(value) => Some(value.to_string()),
            Body::Raw(s) => Some(s),
        }
    }
}

fn is_blank_text(s: &str) -> bool {
    s.is_empty() || s == "0"
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::Raw(s)
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::Raw(s.to_string())
    }
}
