//! itau-http - Network client for the Itaú API.
//!
//! Authenticates with OAuth2 client credentials over mutual TLS, reuses
//! tokens through a [`SessionStore`](itau_core::SessionStore), and performs
//! JSON requests whose responses are classified into payloads or typed
//! errors.

mod client;
mod tls;
mod token;
mod transport;

pub use client::ItauClient;
pub use token::TokenManager;
pub use transport::{Transport, TransportOptions};
