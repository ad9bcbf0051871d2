// ABOUTME: Option store abstraction shared by all backends
// ABOUTME: Get-by-name / set-by-name semantics with a revision counter per option

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{StorageError, StorageResult};

/// A persisted option as returned by a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOption {
    pub name: String,
    pub value: Value,
    /// Starts at 1 on first write, incremented on every overwrite
    pub revision: i64,
    pub updated_at: String,
}

/// Persistence collaborator for named option objects.
///
/// Writes replace the whole value (last writer wins). `set_option_if_revision`
/// is the only write that checks for concurrent modification; an
/// `expected_revision` of 0 means "the option must not exist yet".
#[async_trait]
pub trait OptionStore: Send + Sync {
    async fn get_option(&self, name: &str) -> StorageResult<Option<StoredOption>>;

    async fn set_option(&self, name: &str, value: &Value) -> StorageResult<StoredOption>;

    async fn set_option_if_revision(
        &self,
        name: &str,
        value: &Value,
        expected_revision: i64,
    ) -> StorageResult<StoredOption>;

    /// Returns true if an option was removed
    async fn delete_option(&self, name: &str) -> StorageResult<bool>;
}

pub(crate) fn check_name(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidInput(
            "Option name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
