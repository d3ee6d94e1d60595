//! Cached authentication session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::tokens::AccessToken;

/// A token response remembered under a session cache key.
///
/// An entry is usable without re-authenticating while
/// `now - generated_at < expires_in`. Stale entries are skipped by the token
/// manager and overwritten on the next exchange; nothing removes them.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    access_token: String,
    expires_in: u64,
    generated_at: DateTime<Utc>,
    raw_payload: Value,
}

impl SessionEntry {
    /// Build an entry from a decoded token response.
    ///
    /// Returns `None` when the payload carries no `access_token`. A missing or
    /// non-numeric `expires_in` yields an entry that is never valid.
    pub fn from_payload(payload: Value, generated_at: DateTime<Utc>) -> Option<Self> {
        let access_token = payload.get("access_token")?.as_str()?.to_string();
        let expires_in = payload.get("expires_in").and_then(parse_seconds).unwrap_or(0);

        Some(Self {
            access_token,
            expires_in,
            generated_at,
            raw_payload: payload,
        })
    }

    /// Whether the token may still be used at `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.generated_at);
        // A clock that moved backwards makes the age negative; that still counts as fresh.
        age.num_milliseconds() < (self.expires_in as i64).saturating_mul(1000)
    }

    pub fn access_token(&self) -> AccessToken {
        AccessToken::new(self.access_token.clone())
    }

    /// Token lifetime in seconds, as reported by the auth endpoint.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// The full token response, including fields this crate does not interpret.
    pub fn raw_payload(&self) -> &Value {
        &self.raw_payload
    }
}

fn parse_seconds(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl fmt::Debug for SessionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEntry")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("generated_at", &self.generated_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn valid_strictly_before_expiry() {
        let t0 = Utc::now();
        let entry =
            SessionEntry::from_payload(json!({"access_token": "abc", "expires_in": 300}), t0)
                .unwrap();

        assert!(entry.is_valid_at(t0));
        assert!(entry.is_valid_at(t0 + Duration::seconds(299)));
        assert!(!entry.is_valid_at(t0 + Duration::seconds(300)));
        assert!(!entry.is_valid_at(t0 + Duration::seconds(301)));
    }

    #[test]
    fn missing_expiry_is_never_valid() {
        let t0 = Utc::now();
        let entry = SessionEntry::from_payload(json!({"access_token": "abc"}), t0).unwrap();
        assert!(!entry.is_valid_at(t0));
    }

    #[test]
    fn string_expiry_is_accepted() {
        let entry =
            SessionEntry::from_payload(json!({"access_token": "abc", "expires_in": "60"}), Utc::now())
                .unwrap();
        assert_eq!(entry.expires_in(), 60);
    }

    #[test]
    fn payload_without_token_is_rejected() {
        assert!(SessionEntry::from_payload(json!({"status_code": 204}), Utc::now()).is_none());
    }

    #[test]
    fn extra_fields_survive() {
        let payload = json!({"access_token": "abc", "expires_in": 300, "scope": "pix.read"});
        let entry = SessionEntry::from_payload(payload.clone(), Utc::now()).unwrap();
        assert_eq!(entry.raw_payload(), &payload);
        assert!(!format!("{:?}", entry).contains("abc"));
    }
}
