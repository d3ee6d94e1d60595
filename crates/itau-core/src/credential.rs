//! Client credential type.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::tokens::AccessToken;
use crate::types::{ApiUrl, Environment};

/// Everything needed to talk to the API on behalf of one client.
///
/// Holds the OAuth2 client identity, the mutual-TLS certificate and key, the
/// target [`Environment`], an optional session cache key and the bearer token
/// currently attached to it. The token is set by the token manager once an
/// exchange succeeds or a cached session is reused.
///
/// # Security
///
/// The client secret and token are never exposed in Debug output.
///
/// # Example
///
/// ```
/// use itau_core::{Credential, Environment};
///
/// let env = Environment::new("https://api.test/v2", "https://auth.test/oauth/token").unwrap();
/// let credential = Credential::new("client-id", "client-secret", "cert.pem", "key.pem", env)
///     .with_session_key("tenant-a");
/// assert_eq!(credential.client_id(), "client-id");
/// assert!(credential.authorization_token().is_none());
/// ```
#[derive(Clone)]
pub struct Credential {
    client_id: String,
    client_secret: String,
    certificate_path: PathBuf,
    certificate_key_path: PathBuf,
    environment: Environment,
    session_cache_key: Option<String>,
    authorization_token: Option<AccessToken>,
}

impl Credential {
    /// Create a new credential with no token attached.
    ///
    /// # Arguments
    ///
    /// * `client_id` / `client_secret` - OAuth2 client identity
    /// * `certificate_path` - PEM client certificate presented during the TLS handshake
    /// * `certificate_key_path` - PEM private key for that certificate
    /// * `environment` - API and auth endpoints
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        certificate_path: impl Into<PathBuf>,
        certificate_key_path: impl Into<PathBuf>,
        environment: Environment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            certificate_path: certificate_path.into(),
            certificate_key_path: certificate_key_path.into(),
            environment,
            session_cache_key: None,
            authorization_token: None,
        }
    }

    /// Scope token reuse to `key` in the session store.
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_cache_key = Some(key.into());
        self
    }

    /// Attach a token obtained elsewhere.
    pub fn with_authorization_token(mut self, token: AccessToken) -> Self {
        self.authorization_token = Some(token);
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the client secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing the token request.
    /// Never log or display this value.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn certificate_path(&self) -> &Path {
        &self.certificate_path
    }

    pub fn certificate_key_path(&self) -> &Path {
        &self.certificate_key_path
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Base URL for business requests.
    pub fn base_api_url(&self) -> &ApiUrl {
        self.environment.api_url()
    }

    /// OAuth2 token endpoint.
    pub fn auth_url(&self) -> &ApiUrl {
        self.environment.auth_url()
    }

    pub fn session_cache_key(&self) -> Option<&str> {
        self.session_cache_key.as_deref()
    }

    pub fn authorization_token(&self) -> Option<&AccessToken> {
        self.authorization_token.as_ref()
    }

    pub fn set_authorization_token(&mut self, token: AccessToken) {
        self.authorization_token = Some(token);
    }

    /// Drop the attached token, forcing the next call to authenticate.
    pub fn clear_authorization_token(&mut self) {
        self.authorization_token = None;
    }
}

// Intentionally hide secret and token in Debug output
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("certificate_path", &self.certificate_path)
            .field("certificate_key_path", &self.certificate_key_path)
            .field("environment", &self.environment)
            .field("session_cache_key", &self.session_cache_key)
            .field("authorization_token", &self.authorization_token)
            .finish()
    }
}
