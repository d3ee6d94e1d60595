//! High-level client tying credential, token manager and transport together.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use itau_core::{Body, Credential, Method, Result, SessionStore};

use crate::token::TokenManager;
use crate::transport::{Transport, TransportOptions};

/// An authenticated client for the Itaú API.
///
/// Construction authenticates immediately unless the credential already
/// carries a token, so every request made through the client is sent with a
/// bearer token.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use itau_core::{Credential, Environment, MemorySessionStore};
/// use itau_http::{ItauClient, TransportOptions};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), itau_core::Error> {
/// let env = Environment::new(
///     "https://secure.api.test/pix_recebimentos/v2",
///     "https://sts.api.test/api/oauth/token",
/// )?;
/// let credential = Credential::new("client-id", "secret", "cert.crt", "cert.key", env)
///     .with_session_key("itau-pix");
/// let store = Arc::new(MemorySessionStore::new());
///
/// let client = ItauClient::connect(credential, store, TransportOptions::default()).await?;
/// let cob = client.put("/cob/abc123", json!({"valor": {"original": "10.00"}})).await?;
/// println!("{}", cob);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ItauClient {
    credential: Credential,
    tokens: TokenManager,
    transport: Transport,
}

impl ItauClient {
    /// Build a mutual-TLS transport for `credential` and authenticate.
    ///
    /// # Errors
    ///
    /// Returns an input error if the certificate cannot be loaded, or an
    /// [`AuthError`](itau_core::AuthError) if no token can be obtained.
    #[instrument(skip_all, fields(client_id = %credential.client_id()))]
    pub async fn connect(
        credential: Credential,
        store: Arc<dyn SessionStore>,
        options: TransportOptions,
    ) -> Result<Self> {
        let transport = Transport::new(&credential, options)?;
        Self::with_transport(credential, transport, store).await
    }

    /// Authenticate over an existing transport.
    pub async fn with_transport(
        mut credential: Credential,
        transport: Transport,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let tokens = TokenManager::new(transport.clone(), store);

        if credential.authorization_token().is_none() {
            tokens.ensure_authenticated(&mut credential).await?;
        }

        Ok(Self {
            credential,
            tokens,
            transport,
        })
    }

    /// The credential, with its current token.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.tokens
    }

    /// Re-check the token, reusing a valid cached session when possible.
    pub async fn authenticate(&mut self) -> Result<()> {
        self.tokens.ensure_authenticated(&mut self.credential).await
    }

    /// Discard the current token and exchange credentials for a new one.
    ///
    /// The old token stays discarded even when the exchange fails or the
    /// endpoint answers 204.
    pub async fn reauthenticate(&mut self) -> Result<()> {
        debug!("Forcing token refresh");
        self.credential.clear_authorization_token();
        self.tokens.refresh(&mut self.credential).await
    }

    /// Send a request with an optional body.
    pub async fn send(&self, path: &str, method: Method, body: Option<Body>) -> Result<Value> {
        self.transport
            .send(&self.credential, path, method, body)
            .await
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.send(path, Method::Get, None).await
    }

    pub async fn post(&self, path: &str, body: impl Into<Body>) -> Result<Value> {
        self.send(path, Method::Post, Some(body.into())).await
    }

    pub async fn put(&self, path: &str, body: impl Into<Body>) -> Result<Value> {
        self.send(path, Method::Put, Some(body.into())).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.send(path, Method::Delete, None).await
    }
}
