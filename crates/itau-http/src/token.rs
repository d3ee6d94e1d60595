//! OAuth2 client-credentials token management.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use itau_core::error::{AuthError, LOGIC_ERROR_CODE};
use itau_core::{AccessToken, Credential, Result, SessionEntry, SessionStore};

use crate::transport::Transport;

/// Obtains bearer tokens and reuses them through a [`SessionStore`].
///
/// Authentication for a given session key is serialized: while one task is
/// checking the cache and exchanging credentials, others using the same key
/// wait and then pick up the freshly stored token instead of exchanging again.
/// Credentials without a session key never touch the store.
///
/// One lock is kept per distinct session key for the manager's lifetime and
/// never evicted. Keys are expected to be a small caller-chosen set (one per
/// tenant or client id), not per-request values.
///
/// Cheap to clone; clones share the store and the per-key locks.
#[derive(Clone)]
pub struct TokenManager {
    inner: Arc<TokenManagerInner>,
}

struct TokenManagerInner {
    transport: Transport,
    store: Arc<dyn SessionStore>,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TokenManager {
    pub fn new(transport: Transport, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(TokenManagerInner {
                transport,
                store,
                key_locks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Make sure `credential` carries a usable token.
    ///
    /// A still-valid session cached under the credential's key is reused
    /// without any network traffic; otherwise a client-credentials exchange
    /// is performed and, when a key is set, its result cached.
    ///
    /// A 204 from the token endpoint counts as success but attaches no token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the exchange fails or the endpoint reports
    /// an error.
    #[instrument(skip(self, credential), fields(client_id = %credential.client_id()))]
    pub async fn ensure_authenticated(&self, credential: &mut Credential) -> Result<()> {
        let Some(key) = credential.session_cache_key().map(str::to_owned) else {
            return self.exchange(credential, None).await;
        };

        let lock = self.key_lock(&key).await;
        let _guard = lock.lock().await;

        if let Some(entry) = self.inner.store.get(&key).await
            && entry.is_valid_at(Utc::now())
        {
            debug!(key = %key, "Reusing cached session");
            credential.set_authorization_token(entry.access_token());
            return Ok(());
        }

        self.exchange(credential, Some(&key)).await
    }

    /// Always exchange credentials for a new token, replacing any cached one.
    #[instrument(skip(self, credential), fields(client_id = %credential.client_id()))]
    pub async fn refresh(&self, credential: &mut Credential) -> Result<()> {
        let Some(key) = credential.session_cache_key().map(str::to_owned) else {
            return self.exchange(credential, None).await;
        };

        let lock = self.key_lock(&key).await;
        let _guard = lock.lock().await;

        self.exchange(credential, Some(&key)).await
    }

    /// Returns the session cached under `key`, if any.
    pub async fn cached(&self, key: &str) -> Option<SessionEntry> {
        self.inner.store.get(key).await
    }

    async fn exchange(&self, credential: &mut Credential, key: Option<&str>) -> Result<()> {
        info!(auth_url = %credential.auth_url(), "Requesting client-credentials token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credential.client_id()),
            ("client_secret", credential.client_secret()),
        ];

        let raw = self
            .inner
            .transport
            .post_form(credential.auth_url().as_str(), &form)
            .await;

        let no_content = raw.status == Some(204);
        let payload = raw.classify().map_err(AuthError::from)?;

        if no_content {
            warn!("Token endpoint returned no content; no token attached");
            return Ok(());
        }

        let Some(token) = payload.get("access_token").and_then(Value::as_str) else {
            return Err(
                AuthError::new("missing access_token in auth response", LOGIC_ERROR_CODE).into(),
            );
        };

        credential.set_authorization_token(AccessToken::new(token));

        if let Some(key) = key
            && let Some(entry) = SessionEntry::from_payload(payload, Utc::now())
        {
            debug!(key, expires_in = entry.expires_in(), "Caching session");
            self.inner.store.set(key, entry).await;
        }

        debug!("Token obtained");
        Ok(())
    }

    async fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.inner.key_locks.lock().await;
        locks.entry(key.to_string()).or_default().clone()
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("transport", &self.inner.transport)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportOptions;
    use itau_core::MemorySessionStore;

    fn manager() -> TokenManager {
        let transport = Transport::from_client(reqwest::Client::new(), TransportOptions::default());
        TokenManager::new(transport, Arc::new(MemorySessionStore::new()))
    }

    #[tokio::test]
    async fn one_lock_per_session_key() {
        let manager = manager();

        let first = manager.key_lock("tenant-a").await;
        let again = manager.key_lock("tenant-a").await;
        let other = manager.key_lock("tenant-b").await;

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(manager.inner.key_locks.lock().await.len(), 2);
    }
}
