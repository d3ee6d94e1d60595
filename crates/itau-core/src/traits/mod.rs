//! Core traits implemented by pluggable collaborators.

mod session_store;

pub use session_store::SessionStore;
