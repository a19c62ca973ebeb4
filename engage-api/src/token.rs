//! TokenStore trait and in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Key the bearer token is persisted under.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Persistent storage for the bearer token.
///
/// Implementations store a single value under [`AUTH_TOKEN_KEY`].
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    async fn get(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored token.
    async fn set(&self, token: &str) -> Result<(), StoreError>;

    /// Removes the stored token. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Token store that lives only as long as the process.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &str) -> Result<(), StoreError> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_the_token() {
        let store = MemoryTokenStore::new();
        let other = store.clone();

        store.set("abc").await.unwrap();
        assert_eq!(other.get().await.unwrap().as_deref(), Some("abc"));

        other.clear().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);

        // Clearing twice is fine
        store.clear().await.unwrap();
    }
}
