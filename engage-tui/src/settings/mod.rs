//! Console settings: typed values by key, kept in SQLite between runs.

mod backend;
mod sqlite;
mod token_store;

pub use backend::SettingsBackend;
pub use sqlite::SqliteBackend;
pub use token_store::SettingsTokenStore;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings database: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("could not encode setting: {0}")]
    Encode(bincode::Error),
    #[error("stored setting is unreadable: {0}")]
    Decode(bincode::Error),
}

/// Bincode-encoded values over any [`SettingsBackend`]. Clones share the
/// backend.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let Some(bytes) = self.backend.load(key).await? else {
            return Ok(None);
        };
        bincode::deserialize(&bytes).map(Some).map_err(SettingsError::Decode)
    }

    pub async fn set<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let bytes = bincode::serialize(value).map_err(SettingsError::Encode)?;
        self.backend.store(key, bytes).await
    }

    /// Removing a missing key is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn in_memory() -> SettingsProvider {
        SettingsProvider::new(SqliteBackend::in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_typed_round_trip_and_delete() {
        let settings = in_memory().await;

        assert_eq!(settings.get::<String>("auth_token").await.unwrap(), None);

        settings.set("auth_token", "abc").await.unwrap();
        settings.set("per_page", &25u32).await.unwrap();
        assert_eq!(settings.get::<String>("auth_token").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(settings.get::<u32>("per_page").await.unwrap(), Some(25));

        settings.remove("auth_token").await.unwrap();
        settings.remove("auth_token").await.unwrap();
        assert_eq!(settings.get::<String>("auth_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_mistyped_read_is_a_decode_error() {
        let settings = in_memory().await;

        settings.set("per_page", &7u8).await.unwrap();
        let err = settings.get::<String>("per_page").await.unwrap_err();
        assert!(matches!(err, SettingsError::Decode(_)));
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_separate() {
        let first = in_memory().await;
        let second = in_memory().await;

        first.set("auth_token", "only-here").await.unwrap();

        assert_eq!(second.get::<String>("auth_token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");
        {
            let settings = SettingsProvider::new(SqliteBackend::new(&path).await.unwrap());
            settings.set("auth_token", "persisted").await.unwrap();
        }

        let settings = SettingsProvider::new(SqliteBackend::new(&path).await.unwrap());
        assert_eq!(
            settings.get::<String>("auth_token").await.unwrap().as_deref(),
            Some("persisted")
        );
    }
}
