//! In-memory session storage.
//!
//! Thread-safe, shared between clones. Useful for tests and for front-ends
//! that do not persist the session across restarts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::ports::{SessionStore, SessionStoreError};

/// Thread-safe in-memory key/value store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    /// Number of stored values.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        self.values.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemorySessionStore::new();
        store.set("accessToken", "abc").await.unwrap();
        assert_eq!(store.get("accessToken").await.unwrap().as_deref(), Some("abc"));

        store.remove("accessToken").await.unwrap();
        assert_eq!(store.get("accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_removes_every_key() {
        let store = MemorySessionStore::with_entries([
            ("accessToken", "t"),
            ("role", "EXPERT"),
            ("userId", "u-1"),
            ("language", "tr"),
        ]);
        assert_eq!(store.len().await, 4);

        store.clear().await.unwrap();
        assert!(store.is_empty().await);

        // Clearing twice is harmless.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        other.set("role", "ADMIN").await.unwrap();
        assert_eq!(store.get("role").await.unwrap().as_deref(), Some("ADMIN"));
    }
}
