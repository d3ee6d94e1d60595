//! Validated configuration types.
//!
//! These types enforce their invariants at construction time, so a
//! [`Credential`](crate::Credential) can never point at a malformed endpoint.

mod api_url;
mod environment;

pub use api_url::ApiUrl;
pub use environment::Environment;
