// ABOUTME: In-memory option store
// ABOUTME: Used by tests and embedders that do not need durable settings

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::options::{check_name, OptionStore, StoredOption};
use crate::{StorageError, StorageResult};

#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    options: RwLock<HashMap<String, StoredOption>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_entry(
        options: &mut HashMap<String, StoredOption>,
        name: &str,
        value: &Value,
    ) -> StoredOption {
        let revision = options.get(name).map(|o| o.revision).unwrap_or(0) + 1;
        let stored = StoredOption {
            name: name.to_string(),
            value: value.clone(),
            revision,
            updated_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };
        options.insert(name.to_string(), stored.clone());
        stored
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get_option(&self, name: &str) -> StorageResult<Option<StoredOption>> {
        Ok(self.options.read().await.get(name).cloned())
    }

    async fn set_option(&self, name: &str, value: &Value) -> StorageResult<StoredOption> {
        check_name(name)?;
        let mut options = self.options.write().await;
        let stored = Self::write_entry(&mut options, name, value);
        debug!("Stored option {} at revision {}", name, stored.revision);
        Ok(stored)
    }

    async fn set_option_if_revision(
        &self,
        name: &str,
        value: &Value,
        expected_revision: i64,
    ) -> StorageResult<StoredOption> {
        check_name(name)?;
        let mut options = self.options.write().await;
        let actual = options.get(name).map(|o| o.revision).unwrap_or(0);
        if actual != expected_revision {
            return Err(StorageError::Conflict {
                name: name.to_string(),
                expected: expected_revision,
                actual,
            });
        }
        Ok(Self::write_entry(&mut options, name, value))
    }

    async fn delete_option(&self, name: &str) -> StorageResult<bool> {
        Ok(self.options.write().await.remove(name).is_some())
    }
}
