//! Token store errors

/// A token store failed to read or write.
#[derive(Debug, thiserror::Error)]
#[error("Token store error: {0}")]
pub struct StoreError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl StoreError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}
