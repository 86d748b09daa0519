// Key-value store trait for local string storage
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode stored value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode stored value: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Synchronous string store keyed by name. Writes replace the whole value.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
