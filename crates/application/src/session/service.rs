//! Session lifecycle: written at login, read per request, cleared on
//! expiry or logout.

use std::sync::Arc;

use bazaar_domain::{SessionKey, SessionSnapshot};
use tracing::info;

use crate::ports::{SessionStore, SessionStoreError};

/// Reads and writes the persisted session triple.
#[derive(Debug)]
pub struct SessionService<S> {
    store: Arc<S>,
}

impl<S> Clone for SessionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SessionStore> SessionService<S> {
    /// Creates a service over a shared store.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persists a fresh session.
    ///
    /// Keys missing from `snapshot` are removed so no value of a previous
    /// session survives.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn login(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        let present = snapshot.entries();
        for key in SessionKey::ALL {
            match present.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => self.store.set(key, value).await?,
                None => self.store.remove(key).await?,
            }
        }
        info!(
            role = snapshot.role.as_deref().unwrap_or("-"),
            "session stored"
        );
        Ok(())
    }

    /// Reads the current session.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn current(&self) -> Result<SessionSnapshot, SessionStoreError> {
        Ok(SessionSnapshot {
            access_token: self.store.get(SessionKey::ACCESS_TOKEN).await?,
            role: self.store.get(SessionKey::ROLE).await?,
            user_id: self.store.get(SessionKey::USER_ID).await?,
        })
    }

    /// Returns true when a token is stored.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn is_authenticated(&self) -> Result<bool, SessionStoreError> {
        Ok(self.current().await?.has_token())
    }

    /// Drops all persisted state.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn logout(&self) -> Result<(), SessionStoreError> {
        self.store.clear().await?;
        info!("session cleared");
        Ok(())
    }
}
