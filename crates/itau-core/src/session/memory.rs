//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SessionEntry;
use crate::traits::SessionStore;

/// A [`SessionStore`] that lives for the lifetime of the process.
///
/// Share one instance (behind an `Arc`) between every client that should
/// reuse the same tokens.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, SessionEntry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys with an entry, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Option<SessionEntry> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, entry: SessionEntry) {
        self.entries.write().await.insert(key.to_string(), entry);
    }
}
