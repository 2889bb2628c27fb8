//! Credentials and Token Storage
//!
//! Opaque credentials exchanged with the verification API, and the
//! client-side store that keeps the access token across page loads.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Bearer credential proving a prior purchase
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Checkout session identifier appended by the checkout provider on return
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-shot token delivered by email inside a magic link
#[derive(Clone, PartialEq, Eq)]
pub struct MagicToken(String);

impl MagicToken {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A verified magic token becomes the persisted access token
    pub fn into_access_token(self) -> AccessToken {
        AccessToken(self.0)
    }
}

impl std::fmt::Debug for MagicToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MagicToken(<redacted>)")
    }
}

/// Client-side persistence for the access token.
///
/// Writes are whole-value replacements; there is no cross-context locking.
pub trait TokenStore {
    /// Read the persisted token, if any
    fn load(&self) -> Result<Option<AccessToken>>;

    /// Replace the persisted token
    fn save(&self, token: &AccessToken) -> Result<()>;

    /// Discard the persisted token
    fn clear(&self) -> Result<()>;
}

/// In-memory token store (for tests and non-browser hosts)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<AccessToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(AccessToken::new(token))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>> {
        Ok(self
            .token
            .borrow()
            .clone()
            .filter(|t| !t.as_str().is_empty()))
    }

    fn save(&self, token: &AccessToken) -> Result<()> {
        *self.token.borrow_mut() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.token.borrow_mut().take();
        Ok(())
    }
}
