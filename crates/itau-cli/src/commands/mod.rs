//! Subcommand implementations.

pub mod request;
pub mod token;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use itau_core::{Credential, Environment, MemorySessionStore};
use itau_http::{ItauClient, TransportOptions};

use crate::output;

/// Credential and environment settings shared by every command.
///
/// Each flag falls back to an `ITAU_*` environment variable.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// OAuth2 client id
    #[arg(long, env = "ITAU_CLIENT_ID")]
    pub client_id: String,

    /// OAuth2 client secret
    #[arg(long, env = "ITAU_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// PEM client certificate used for mutual TLS
    #[arg(long, env = "ITAU_CERTIFICATE")]
    pub certificate: PathBuf,

    /// PEM private key for the client certificate
    #[arg(long, env = "ITAU_CERTIFICATE_KEY")]
    pub certificate_key: PathBuf,

    /// Base URL for API requests
    #[arg(long, env = "ITAU_API_URL")]
    pub api_url: String,

    /// OAuth2 token endpoint
    #[arg(long, env = "ITAU_AUTH_URL")]
    pub auth_url: String,

    /// Session cache key scoping token reuse
    #[arg(long, env = "ITAU_SESSION_KEY")]
    pub session_key: Option<String>,

    /// Fixed correlation id (a random one is generated per request otherwise)
    #[arg(long, env = "ITAU_CORRELATION_ID")]
    pub correlation_id: Option<String>,

    /// Request and connect timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Skip server certificate verification (unsafe)
    #[arg(long)]
    pub insecure: bool,
}

impl ConnectionArgs {
    fn credential(&self) -> Result<Credential> {
        let environment =
            Environment::new(&self.api_url, &self.auth_url).context("Invalid environment URL")?;

        let credential = Credential::new(
            &self.client_id,
            &self.client_secret,
            &self.certificate,
            &self.certificate_key,
            environment,
        );

        Ok(match &self.session_key {
            Some(key) => credential.with_session_key(key),
            None => credential,
        })
    }

    fn transport_options(&self) -> TransportOptions {
        let timeout = Duration::from_secs(self.timeout);
        TransportOptions {
            timeout,
            connect_timeout: timeout,
            accept_invalid_certs: self.insecure,
            correlation_id: self.correlation_id.clone(),
            ..Default::default()
        }
    }

    /// Load the certificate and authenticate.
    pub async fn connect(&self) -> Result<ItauClient> {
        if self.insecure {
            output::warning("Server certificate verification is disabled");
        }

        let credential = self.credential()?;
        let store = Arc::new(MemorySessionStore::new());

        ItauClient::connect(credential, store, self.transport_options())
            .await
            .context("Failed to authenticate")
    }
}
