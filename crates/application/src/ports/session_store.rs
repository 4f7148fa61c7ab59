//! Session storage port
//!
//! A process-wide key/value store that survives restarts. The gateway reads
//! `accessToken` from it before every request and clears it when the server
//! reports the session as expired.

use async_trait::async_trait;

/// Errors that can occur while touching the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key/value storage for session values.
///
/// `clear` removes every key, not only the session triple. All operations
/// are idempotent; clearing an empty store succeeds.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    /// Writes a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    /// Removes a value.
    async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;

    /// Removes every value.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
