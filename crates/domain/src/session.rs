//! Persisted session values

use serde::{Deserialize, Serialize};

/// Keys under which the session is persisted.
pub struct SessionKey;

impl SessionKey {
    /// The bearer token.
    pub const ACCESS_TOKEN: &'static str = "accessToken";
    /// The user's role, kept for authorization display.
    pub const ROLE: &'static str = "role";
    /// The user's id, kept for authorization display.
    pub const USER_ID: &'static str = "userId";

    /// All session keys, in the order they are written at login.
    pub const ALL: [&'static str; 3] = [Self::ACCESS_TOKEN, Self::ROLE, Self::USER_ID];
}

/// The values written at login and cleared on expiry or logout.
///
/// The token is opaque; nothing here parses or validates it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Bearer token.
    pub access_token: Option<String>,
    /// Role name.
    pub role: Option<String>,
    /// User id.
    pub user_id: Option<String>,
}

impl SessionSnapshot {
    /// Creates a snapshot holding only a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Returns true when a non-empty token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns the snapshot as key/value pairs, skipping absent values.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            (SessionKey::ACCESS_TOKEN, self.access_token.as_deref()),
            (SessionKey::ROLE, self.role.as_deref()),
            (SessionKey::USER_ID, self.user_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect()
    }
}
