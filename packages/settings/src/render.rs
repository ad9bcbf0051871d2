// ABOUTME: Template data for the settings page
// ABOUTME: Pure functions turning field specs and stored values into renderable controls

use serde::{Deserialize, Serialize};
use url::Url;

use crate::fields::{fields, FieldKind, FieldSpec, Placeholder, PLACEHOLDERS, SECTION_TITLE};
use crate::sanitize::escape_html;
use crate::types::{SettingValue, SettingsBlob};

/// Admin page slug the settings link points at
pub const SETTINGS_PAGE_SLUG: &str = "notify-users-e-mail";

/// Rows shown by the rich-text editor
const EDITOR_ROWS: u32 = 10;

/// A user role offered in the recipients multi-select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldControl {
    /// Single-line input; `value` is already HTML-escaped
    TextInput {
        id: String,
        name: String,
        value: String,
        class: &'static str,
    },
    /// Rich-text editor; `content` is the stored markup, unescaped
    Editor {
        id: String,
        textarea_name: String,
        rows: u32,
        content: String,
    },
    MultiSelect {
        id: String,
        name: String,
        options: Vec<SelectOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub id: String,
    pub label: &'static str,
    pub control: FieldControl,
    pub description: Option<&'static str>,
    pub placeholders: Vec<Placeholder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedSection {
    pub title: &'static str,
    pub settings_name: String,
    pub fields: Vec<RenderedField>,
}

/// Entry in the plugin list action row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionLink {
    pub key: String,
    pub label: String,
    pub href: String,
}

/// Form field name for a scalar option: `name[key]`
pub fn field_name(settings_name: &str, key: &str) -> String {
    format!("{}[{}]", settings_name, key)
}

/// Form field name for a multi-select option: `name[key][]`
pub fn multi_field_name(settings_name: &str, key: &str) -> String {
    format!("{}[{}][]", settings_name, key)
}

pub fn render_field(
    settings_name: &str,
    spec: &FieldSpec,
    blob: &SettingsBlob,
    roles: &[Role],
) -> RenderedField {
    let id = spec.id.as_str().to_string();
    let current = blob.get_or(spec.id, spec.default.clone());

    let control = match spec.kind {
        FieldKind::Text => FieldControl::TextInput {
            name: field_name(settings_name, &id),
            value: escape_html(&scalar(&current)),
            class: "regular-text",
            id: id.clone(),
        },
        FieldKind::RichText => FieldControl::Editor {
            textarea_name: field_name(settings_name, &id),
            rows: EDITOR_ROWS,
            content: scalar(&current),
            id: id.clone(),
        },
        FieldKind::MultiSelect => {
            let selected = selection(&current);
            FieldControl::MultiSelect {
                name: multi_field_name(settings_name, &id),
                options: roles
                    .iter()
                    .map(|role| SelectOption {
                        value: role.id.clone(),
                        label: role.name.clone(),
                        selected: selected.contains(&role.id.as_str()),
                    })
                    .collect(),
                id: id.clone(),
            }
        }
    };

    RenderedField {
        id,
        label: spec.label,
        control,
        description: spec.description,
        placeholders: if spec.lists_placeholders {
            PLACEHOLDERS.to_vec()
        } else {
            Vec::new()
        },
    }
}

/// Render every registered field in display order
pub fn render_page(settings_name: &str, blob: &SettingsBlob, roles: &[Role]) -> RenderedSection {
    RenderedSection {
        title: SECTION_TITLE,
        settings_name: settings_name.to_string(),
        fields: fields()
            .iter()
            .map(|spec| render_field(settings_name, spec, blob, roles))
            .collect(),
    }
}

/// Link to the settings page shown in the plugin list
pub fn settings_action_link(admin_url: &str) -> Result<ActionLink, url::ParseError> {
    let base = if admin_url.ends_with('/') {
        Url::parse(admin_url)?
    } else {
        Url::parse(&format!("{}/", admin_url))?
    };
    let mut href = base.join("options-general.php")?;
    href.query_pairs_mut().append_pair("page", SETTINGS_PAGE_SLUG);

    Ok(ActionLink {
        key: "settings".to_string(),
        label: "Settings".to_string(),
        href: href.to_string(),
    })
}

/// Put the settings link first. A link already registered under the same
/// key keeps its content but moves to the front.
pub fn with_settings_link(settings: ActionLink, links: Vec<ActionLink>) -> Vec<ActionLink> {
    let (existing, mut rest): (Vec<_>, Vec<_>) =
        links.into_iter().partition(|link| link.key == settings.key);

    let first = existing.into_iter().last().unwrap_or(settings);
    rest.insert(0, first);
    rest
}

fn scalar(value: &SettingValue) -> String {
    match value {
        SettingValue::Text(s) => s.clone(),
        SettingValue::List(items) => items.join(", "),
    }
}

fn selection(value: &SettingValue) -> Vec<&str> {
    match value {
        SettingValue::List(items) => items.iter().map(String::as_str).collect(),
        SettingValue::Text(s) if !s.is_empty() => vec![s.as_str()],
        SettingValue::Text(_) => Vec::new(),
    }
}
