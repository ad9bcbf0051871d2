// ABOUTME: Type definitions for notification settings
// ABOUTME: Known option keys, option values and the persisted settings blob

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownSettingKey;

/// The fixed set of options the settings page manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    SendTo,
    SendToUsers,
    SubjectPost,
    BodyPost,
    SubjectPage,
    BodyPage,
    SubjectComment,
    BodyComment,
    TxtFooter,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::SendTo,
        SettingKey::SendToUsers,
        SettingKey::SubjectPost,
        SettingKey::BodyPost,
        SettingKey::SubjectPage,
        SettingKey::BodyPage,
        SettingKey::SubjectComment,
        SettingKey::BodyComment,
        SettingKey::TxtFooter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::SendTo => "send_to",
            SettingKey::SendToUsers => "send_to_users",
            SettingKey::SubjectPost => "subject_post",
            SettingKey::BodyPost => "body_post",
            SettingKey::SubjectPage => "subject_page",
            SettingKey::BodyPage => "body_page",
            SettingKey::SubjectComment => "subject_comment",
            SettingKey::BodyComment => "body_comment",
            SettingKey::TxtFooter => "txt_footer",
        }
    }

    /// Whether the option holds a list of role identifiers rather than a string
    pub fn is_list(&self) -> bool {
        matches!(self, SettingKey::SendToUsers)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for SettingKey {
    type Err = UnknownSettingKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSettingKey(s.to_string()))
    }
}

/// An option value: a plain string or, for multi-select fields, a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    List(Vec<String>),
}

impl SettingValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(s) => Some(s),
            SettingValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SettingValue::Text(_) => None,
            SettingValue::List(items) => Some(items),
        }
    }
}

impl Default for SettingValue {
    fn default() -> Self {
        SettingValue::Text(String::new())
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(value: Vec<String>) -> Self {
        SettingValue::List(value)
    }
}

impl From<Vec<&str>> for SettingValue {
    fn from(value: Vec<&str>) -> Self {
        SettingValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Untrusted key/value mapping decoded from a settings form submission
pub type RawSubmission = BTreeMap<String, SettingValue>;

/// The persisted settings object.
///
/// Keys are kept as strings so options written by other versions survive a
/// round trip; known keys are addressed through [`SettingKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsBlob(BTreeMap<String, SettingValue>);

impl SettingsBlob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&SettingValue> {
        self.0.get(key.as_ref())
    }

    /// Stored value for `key`, or `default` when the blob has no entry
    pub fn get_or(&self, key: impl AsRef<str>, default: impl Into<SettingValue>) -> SettingValue {
        match self.0.get(key.as_ref()) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Scalar value of `key`, empty when absent or not a string
    pub fn text(&self, key: SettingKey) -> &str {
        self.get(key).and_then(SettingValue::as_text).unwrap_or("")
    }

    /// Roles selected to receive notifications, empty when none are stored
    pub fn roles(&self) -> &[String] {
        match self.get(SettingKey::SendToUsers) {
            Some(SettingValue::List(roles)) => roles,
            Some(SettingValue::Text(role)) if !role.is_empty() => std::slice::from_ref(role),
            _ => &[],
        }
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Option<SettingValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<SettingValue> {
        self.0.remove(key.as_ref())
    }

    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.0.contains_key(key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SettingValue> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, SettingValue> {
        self.0
    }
}

impl From<BTreeMap<String, SettingValue>> for SettingsBlob {
    fn from(map: BTreeMap<String, SettingValue>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, SettingValue)> for SettingsBlob {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SettingsBlob {
    type Item = (String, SettingValue);
    type IntoIter = btree_map::IntoIter<String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SettingsBlob {
    type Item = (&'a String, &'a SettingValue);
    type IntoIter = btree_map::Iter<'a, String, SettingValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
