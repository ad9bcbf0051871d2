// ABOUTME: Validation of submitted settings before they are persisted
// ABOUTME: Reshapes a raw form submission into a storable settings blob

use tracing::{debug, warn};

use crate::sanitize::sanitize_text_field;
use crate::types::{RawSubmission, SettingKey, SettingValue, SettingsBlob};

/// Validator bound to one settings object. The default validator is bound to
/// none, and its log lines name only the option key.
#[derive(Debug, Clone, Default)]
pub struct SettingsValidator {
    settings_name: String,
}

impl SettingsValidator {
    pub fn new(settings_name: impl Into<String>) -> Self {
        Self {
            settings_name: settings_name.into(),
        }
    }

    pub fn settings_name(&self) -> &str {
        &self.settings_name
    }

    /// Produce the blob to persist from a raw submission.
    ///
    /// Only submitted keys are kept; nothing is merged from the previous blob
    /// and nothing is defaulted. Role selections are sanitized element by
    /// element and always stored as a list. Every other value is stored
    /// verbatim and escaped by whoever renders it.
    pub fn validate(&self, raw: RawSubmission) -> SettingsBlob {
        debug!(
            "Validating {} submitted keys for {}",
            raw.len(),
            self.describe()
        );

        raw.into_iter()
            .map(|(key, value)| {
                let value = if key == SettingKey::SendToUsers.as_str() {
                    self.sanitize_roles(value)
                } else {
                    value
                };
                (key, value)
            })
            .collect()
    }

    fn sanitize_roles(&self, value: SettingValue) -> SettingValue {
        let roles = match value {
            SettingValue::List(items) => items
                .iter()
                .map(|item| sanitize_text_field(item))
                .collect(),
            SettingValue::Text(single) => {
                warn!(
                    "{} submitted as a single value, storing it as a list",
                    self.describe_key(SettingKey::SendToUsers)
                );
                let role = sanitize_text_field(&single);
                if role.is_empty() {
                    Vec::new()
                } else {
                    vec![role]
                }
            }
        };

        SettingValue::List(roles)
    }

    fn describe(&self) -> &str {
        if self.settings_name.is_empty() {
            "unnamed settings"
        } else {
            &self.settings_name
        }
    }

    fn describe_key(&self, key: SettingKey) -> String {
        if self.settings_name.is_empty() {
            key.to_string()
        } else {
            format!("{}[{}]", self.settings_name, key)
        }
    }
}

/// Validate a submission outside any settings store. The result does not
/// depend on the settings name, so this is the same as
/// `SettingsValidator::new(name).validate(raw)` for every name.
pub fn validate(raw: RawSubmission) -> SettingsBlob {
    SettingsValidator::default().validate(raw)
}
