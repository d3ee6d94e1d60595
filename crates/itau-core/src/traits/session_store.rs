//! Session store trait.

use async_trait::async_trait;

use crate::session::SessionEntry;

/// A keyed store holding cached token responses.
///
/// The store is owned by the caller and handed to the token manager, which
/// only ever reads an entry by key and replaces it wholesale. Implementations
/// must be safe to share across tasks.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the entry stored under `key`, stale or not.
    async fn get(&self, key: &str) -> Option<SessionEntry>;

    /// Stores `entry` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, entry: SessionEntry);
}
