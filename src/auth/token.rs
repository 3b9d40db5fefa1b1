//! Token storage.
//!
//! The API client reads and writes credentials only through [`TokenStore`].
//! Where they are persisted (memory, browser storage, keychain) is up to the
//! implementation.

use std::sync::{PoisonError, RwLock};

/// Access + refresh token storage.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Replace the stored tokens. `None` for the refresh token keeps no
    /// refresh token at all.
    fn set_tokens(&self, access_token: String, refresh_token: Option<String>);

    fn clear(&self);

    fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }
}

#[derive(Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

// Token values stay out of debug output.
impl std::fmt::Debug for Tokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("access", &self.access.as_ref().map(|_| "<redacted>"))
            .field("refresh", &self.refresh.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// In-process token store. Tokens are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Tokens>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with tokens (e.g. restored from disk).
    pub fn with_tokens(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            tokens: RwLock::new(Tokens {
                access: Some(access_token.into()),
                refresh: refresh_token,
            }),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access
            .clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh
            .clone()
    }

    fn set_tokens(&self, access_token: String, refresh_token: Option<String>) {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        tokens.access = Some(access_token);
        tokens.refresh = refresh_token;
    }

    fn clear(&self) {
        *self.tokens.write().unwrap_or_else(PoisonError::into_inner) = Tokens::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(!store.has_access_token());

        store.set_tokens("access".to_string(), Some("refresh".to_string()));
        assert_eq!(store.access_token().as_deref(), Some("access"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh"));

        store.clear();
        assert!(store.access_token().is_none());
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_set_replaces_refresh_token() {
        let store = MemoryTokenStore::with_tokens("a1", Some("r1".to_string()));
        store.set_tokens("a2".to_string(), None);
        assert_eq!(store.access_token().as_deref(), Some("a2"));
        assert!(store.refresh_token().is_none());
    }

    #[test]
    fn test_debug_hides_values() {
        let store =
            MemoryTokenStore::with_tokens("secret-access", Some("secret-refresh".to_string()));
        let printed = format!("{:?}", store);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
