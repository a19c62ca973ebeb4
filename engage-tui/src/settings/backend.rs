//! Storage seam under [`SettingsProvider`](super::SettingsProvider).

use async_trait::async_trait;

use super::SettingsError;

/// Opaque values by key. Serialization happens a layer up.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Insert or replace.
    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
