// ABOUTME: Error types for the settings layer
// ABOUTME: Wraps storage failures and malformed persisted blobs

use herald_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Stored settings object {name} is not a key/value mapping: {source}")]
    MalformedBlob {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown setting key: {0}")]
pub struct UnknownSettingKey(pub String);
