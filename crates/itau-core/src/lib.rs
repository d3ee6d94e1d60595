//! itau-core - Core types and traits for the Itaú API client.
//!
//! This crate holds everything that does not touch the network: the
//! [`Credential`] a caller builds, the session cache types and the
//! [`SessionStore`] seam, the request envelope, the shared response
//! classification, and the error taxonomy.

pub mod credential;
pub mod error;
pub mod request;
pub mod response;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credential::Credential;
pub use error::{ApiError, AuthError, Error, InvalidInputError, LOGIC_ERROR_CODE};
pub use request::{Body, Method};
pub use response::{RawResponse, Rejection};
pub use session::{MemorySessionStore, SessionEntry};
pub use tokens::AccessToken;
pub use traits::SessionStore;
pub use types::{ApiUrl, Environment};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
