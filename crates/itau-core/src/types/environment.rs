//! Target environment URLs.

use serde::{Deserialize, Serialize};

use super::ApiUrl;
use crate::Result;

/// The pair of endpoints a credential talks to: the business API base URL
/// and the OAuth2 token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    api_url: ApiUrl,
    auth_url: ApiUrl,
}

impl Environment {
    /// Create an environment from the API base URL and the token endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if either URL is invalid.
    pub fn new(api_url: impl AsRef<str>, auth_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_url: ApiUrl::new(api_url)?,
            auth_url: ApiUrl::new(auth_url)?,
        })
    }

    /// Base URL for business requests.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// OAuth2 token endpoint.
    pub fn auth_url(&self) -> &ApiUrl {
        &self.auth_url
    }
}
