//! `console_settings` table in a local SQLite file.

use std::path::Path;

use async_sqlite::{Client, ClientBuilder};
use async_trait::async_trait;
use dashmap::DashMap;
use log::trace;
use rusqlite::{OptionalExtension, params};

use super::{SettingsBackend, SettingsError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS console_settings (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL
)";
const SELECT: &str = "SELECT value FROM console_settings WHERE key = ?1";
const UPSERT: &str = "INSERT INTO console_settings (key, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE: &str = "DELETE FROM console_settings WHERE key = ?1";

/// Reads go through a [`DashMap`] once a key has been seen; writes update
/// both.
pub struct SqliteBackend {
    client: Client,
    seen: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open the database at `path`, creating file and table when missing.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::open(ClientBuilder::new().path(path)).await
    }

    /// A private database that is gone once dropped.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, SettingsError> {
        Self::open(ClientBuilder::new().path(":memory:")).await
    }

    async fn open(builder: ClientBuilder) -> Result<Self, SettingsError> {
        let client = builder.open().await?;
        client.conn(|conn| conn.execute(SCHEMA, [])).await?;
        Ok(Self {
            client,
            seen: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(hit) = self.seen.get(key) {
            return Ok(Some(hit.value().clone()));
        }

        let owned = key.to_owned();
        let value: Option<Vec<u8>> = self
            .client
            .conn(move |conn| conn.query_row(SELECT, [owned], |row| row.get(0)).optional())
            .await?;
        trace!("setting {key} loaded from disk: {}", value.is_some());

        if let Some(value) = &value {
            self.seen.insert(key.to_owned(), value.clone());
        }
        Ok(value)
    }

    async fn store(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let owned = key.to_owned();
        let bytes = value.clone();
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.client
            .conn(move |conn| conn.execute(UPSERT, params![owned, bytes, updated_at]))
            .await?;
        trace!("setting {key} stored");

        self.seen.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let owned = key.to_owned();
        let removed = self.client.conn(move |conn| conn.execute(DELETE, [owned])).await?;
        trace!("setting {key} removed ({removed} rows)");

        self.seen.remove(key);
        Ok(())
    }
}
