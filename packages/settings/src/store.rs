// ABOUTME: Settings store backed by a named option
// ABOUTME: Default-aware reads and validate-then-replace writes of the settings blob

use std::sync::Arc;

use herald_storage::{OptionStore, StorageError, StoredOption};
use tracing::{debug, info};

use crate::error::{SettingsError, SettingsResult};
use crate::form::decode_form;
use crate::types::{RawSubmission, SettingValue, SettingsBlob};
use crate::validation::SettingsValidator;

pub struct SettingsStore {
    settings_name: String,
    validator: SettingsValidator,
    store: Arc<dyn OptionStore>,
}

impl SettingsStore {
    pub fn new(settings_name: impl Into<String>, store: Arc<dyn OptionStore>) -> Self {
        let settings_name = settings_name.into();
        Self {
            validator: SettingsValidator::new(settings_name.clone()),
            settings_name,
            store,
        }
    }

    pub fn settings_name(&self) -> &str {
        &self.settings_name
    }

    pub fn validator(&self) -> &SettingsValidator {
        &self.validator
    }

    /// Current blob; empty when nothing has been saved yet
    pub async fn load(&self) -> SettingsResult<SettingsBlob> {
        Ok(self.load_with_revision().await?.0)
    }

    /// Current blob with its revision (0 when nothing has been saved yet)
    pub async fn load_with_revision(&self) -> SettingsResult<(SettingsBlob, i64)> {
        match self.store.get_option(&self.settings_name).await? {
            Some(stored) => {
                let revision = stored.revision;
                Ok((self.decode(stored)?, revision))
            }
            None => {
                debug!("No stored settings for {}, using defaults", self.settings_name);
                Ok((SettingsBlob::new(), 0))
            }
        }
    }

    /// Stored value for `key`, or `default` when the blob has no entry
    pub async fn get(
        &self,
        key: impl AsRef<str>,
        default: impl Into<SettingValue>,
    ) -> SettingsResult<SettingValue> {
        Ok(self.load().await?.get_or(key, default))
    }

    /// Validate a submission and replace the stored blob with the result
    pub async fn save(&self, raw: RawSubmission) -> SettingsResult<SettingsBlob> {
        let blob = self.validator.validate(raw);
        let value = serde_json::to_value(&blob).map_err(StorageError::Json)?;
        let stored = self.store.set_option(&self.settings_name, &value).await?;
        info!(
            "Saved {} settings ({} keys, revision {})",
            self.settings_name,
            blob.len(),
            stored.revision
        );
        Ok(blob)
    }

    /// Like [`save`](Self::save), but fails with a conflict if someone else
    /// saved since `expected_revision` was read
    pub async fn save_if_unchanged(
        &self,
        raw: RawSubmission,
        expected_revision: i64,
    ) -> SettingsResult<SettingsBlob> {
        let blob = self.validator.validate(raw);
        let value = serde_json::to_value(&blob).map_err(StorageError::Json)?;
        let stored = self
            .store
            .set_option_if_revision(&self.settings_name, &value, expected_revision)
            .await?;
        info!(
            "Saved {} settings at revision {}",
            self.settings_name, stored.revision
        );
        Ok(blob)
    }

    /// Decode a urlencoded settings form and save it
    pub async fn save_form(&self, body: &str) -> SettingsResult<SettingsBlob> {
        self.save(decode_form(&self.settings_name, body)).await
    }

    /// Remove the stored blob so every read falls back to defaults
    pub async fn reset(&self) -> SettingsResult<bool> {
        let removed = self.store.delete_option(&self.settings_name).await?;
        if removed {
            info!("Reset {} settings", self.settings_name);
        }
        Ok(removed)
    }

    fn decode(&self, stored: StoredOption) -> SettingsResult<SettingsBlob> {
        serde_json::from_value(stored.value).map_err(|source| SettingsError::MalformedBlob {
            name: self.settings_name.clone(),
            source,
        })
    }
}
