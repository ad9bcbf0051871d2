// ABOUTME: Declarative registry of the settings page fields
// ABOUTME: Field ids, labels, defaults, descriptions and control kinds

use serde::Serialize;

use crate::types::{SettingKey, SettingValue};

pub const SECTION_TITLE: &str = "Email Settings";

/// How a field is edited on the settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    RichText,
    MultiSelect,
}

/// Placeholder usable in notification subjects and bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub token: &'static str,
    pub description: &'static str,
}

pub const PLACEHOLDERS: [Placeholder; 3] = [
    Placeholder {
        token: "{title}",
        description: "to display the title",
    },
    Placeholder {
        token: "{link}",
        description: "to display the URL",
    },
    Placeholder {
        token: "{date}",
        description: "to display the date of publication",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub id: SettingKey,
    pub label: &'static str,
    pub default: SettingValue,
    pub description: Option<&'static str>,
    pub kind: FieldKind,
    /// Whether the description is followed by the placeholder list
    pub lists_placeholders: bool,
}

impl FieldSpec {
    fn new(id: SettingKey, label: &'static str, kind: FieldKind) -> Self {
        let default = match kind {
            FieldKind::MultiSelect => SettingValue::List(Vec::new()),
            FieldKind::Text | FieldKind::RichText => SettingValue::Text(String::new()),
        };
        Self {
            id,
            label,
            default,
            description: None,
            kind,
            lists_placeholders: false,
        }
    }

    fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn with_placeholders(mut self) -> Self {
        self.description = Some("You can use the following placeholders:");
        self.lists_placeholders = true;
        self
    }
}

/// All settings page fields in display order
pub fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(SettingKey::SendTo, "Sent to", FieldKind::Text)
            .described("Enter with the recipients for the email (separated by commas)."),
        FieldSpec::new(
            SettingKey::SendToUsers,
            "Send to users",
            FieldKind::MultiSelect,
        )
        .described("Select the type of user that will receive notifications."),
        FieldSpec::new(SettingKey::SubjectPost, "Subject to Post", FieldKind::Text)
            .with_placeholders(),
        FieldSpec::new(SettingKey::BodyPost, "Body to Post", FieldKind::RichText)
            .with_placeholders(),
        FieldSpec::new(SettingKey::SubjectPage, "Subject to Page", FieldKind::Text)
            .with_placeholders(),
        FieldSpec::new(SettingKey::BodyPage, "Body to Page", FieldKind::RichText)
            .with_placeholders(),
        FieldSpec::new(
            SettingKey::SubjectComment,
            "Subject to comment",
            FieldKind::Text,
        )
        .with_placeholders(),
        FieldSpec::new(
            SettingKey::BodyComment,
            "Body to Comment",
            FieldKind::RichText,
        )
        .with_placeholders(),
        FieldSpec::new(SettingKey::TxtFooter, "Text Footer", FieldKind::RichText)
            .with_placeholders(),
    ]
}
