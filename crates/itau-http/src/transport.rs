//! HTTP transport for token and business requests.

use std::time::Duration;

use reqwest::RequestBuilder;
use reqwest::redirect::Policy;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, instrument, trace, warn};
use uuid::Uuid;

use itau_core::error::{ApiError, InvalidInputError};
use itau_core::request::{CORRELATION_ID_HEADER, FLOW_ID_HEADER, JSON_CONTENT_TYPE};
use itau_core::{Body, Credential, Method, RawResponse, Result};

use crate::tls;

/// Tunables for the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Overall per-request timeout.
    pub timeout: Duration,
    /// TCP + TLS connect timeout.
    pub connect_timeout: Duration,
    /// Skip server certificate verification.
    ///
    /// Off by default. Turning it on exposes the client secret and every
    /// payload to anyone able to intercept the connection.
    pub accept_invalid_certs: bool,
    /// Fixed correlation id; a fresh UUID is generated per request when unset.
    pub correlation_id: Option<String>,
    /// Flow id sent with token requests.
    pub flow_id: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(60),
            accept_invalid_certs: false,
            correlation_id: None,
            flow_id: "1".to_string(),
        }
    }
}

/// Executes requests against the API and classifies their responses.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    options: TransportOptions,
}

impl Transport {
    /// Build a mutual-TLS transport from the certificate and key named in
    /// `credential`.
    ///
    /// Redirects are never followed: a 3xx is classified like any other
    /// response, and the token form is never re-posted to another host.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Certificate`] when the files cannot be
    /// read or parsed.
    pub fn new(credential: &Credential, options: TransportOptions) -> Result<Self> {
        let tls = tls::load(
            credential.certificate_path(),
            credential.certificate_key_path(),
        )?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("itau/", env!("CARGO_PKG_VERSION")))
            .identity(tls.identity)
            .add_root_certificate(tls.root)
            .redirect(Policy::none())
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout);

        if options.accept_invalid_certs {
            warn!("TLS certificate verification disabled; connections can be intercepted");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| InvalidInputError::Other {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self { client, options })
    }

    /// Wrap an already configured client.
    ///
    /// The client is used as-is: no certificate is loaded, and TLS and
    /// redirect settings are whatever the caller built into it. reqwest
    /// follows redirects by default; pass `redirect(Policy::none())` to get
    /// the behaviour of [`Transport::new`].
    pub fn from_client(client: reqwest::Client, options: TransportOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Perform a business request and classify the response.
    ///
    /// `path` is resolved against the credential's base URL; the credential's
    /// token, if any, is sent as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for transport failures, HTTP >= 400, empty bodies
    /// and API-reported errors. A 204 response is never an error.
    #[instrument(skip(self, credential, body))]
    pub async fn send(
        &self,
        credential: &Credential,
        path: &str,
        method: Method,
        body: Option<Body>,
    ) -> Result<Value> {
        let url = credential.base_api_url().resolve(path);
        debug!(%url, "API request");

        let mut request = self
            .request(method, &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if let Some(token) = credential.authorization_token() {
            request = request.header(AUTHORIZATION, token.bearer());
        }

        if let Some(payload) = body.and_then(Body::into_payload) {
            request = request.body(payload);
        }

        let raw = self.execute(request).await;
        raw.classify().map_err(|r| ApiError::from(r).into())
    }

    /// POST a form-encoded body, as the token endpoint expects.
    pub(crate) async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> RawResponse {
        let request = self
            .request(Method::Post, url)
            .header(FLOW_ID_HEADER, self.options.flow_id.as_str())
            .form(form);

        self.execute(request).await
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let correlation_id = self
            .options
            .correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.client
            .request(to_reqwest(method), url)
            .header(CORRELATION_ID_HEADER, correlation_id)
            .timeout(self.options.timeout)
    }

    async fn execute(&self, request: RequestBuilder) -> RawResponse {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "request produced no response");
                return RawResponse::failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        trace!(status, "API response");

        match response.text().await {
            Ok(body) => RawResponse {
                status: Some(status),
                body: Some(body),
                diagnostic: None,
            },
            Err(e) => RawResponse {
                status: Some(status),
                body: None,
                diagnostic: Some(e.to_string()),
            },
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}
