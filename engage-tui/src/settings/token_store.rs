//! Bearer token persisted in the settings database.

use async_trait::async_trait;
use engage_api::error::StoreError;
use engage_api::{AUTH_TOKEN_KEY, TokenStore};

use super::SettingsProvider;

/// [`TokenStore`] that keeps the token under `auth_token` in settings, so a
/// login survives restarts.
#[derive(Clone)]
pub struct SettingsTokenStore {
    settings: SettingsProvider,
}

impl SettingsTokenStore {
    pub fn new(settings: SettingsProvider) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl TokenStore for SettingsTokenStore {
    async fn get(&self) -> Result<Option<String>, StoreError> {
        self.settings.get(AUTH_TOKEN_KEY).await.map_err(StoreError::new)
    }

    async fn set(&self, token: &str) -> Result<(), StoreError> {
        self.settings.set(AUTH_TOKEN_KEY, token).await.map_err(StoreError::new)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.settings.remove(AUTH_TOKEN_KEY).await.map_err(StoreError::new)
    }
}
