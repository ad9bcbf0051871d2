// ABOUTME: Implementations of the herald subcommands
// ABOUTME: Each command returns its output so it can be printed or asserted on

use std::str::FromStr;

use anyhow::{anyhow, Context};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use herald_settings::{
    decode_form, fields, render_page, settings_action_link, with_settings_link, ActionLink,
    FieldKind, Role, SettingKey, SettingValue, SettingsStore,
};
use tracing::debug;

/// Roles offered when the caller does not supply a role directory
pub fn default_roles() -> Vec<Role> {
    vec![
        Role::new("administrator", "Administrator"),
        Role::new("editor", "Editor"),
        Role::new("author", "Author"),
        Role::new("contributor", "Contributor"),
        Role::new("subscriber", "Subscriber"),
    ]
}

/// Parse `id=Display Name` (or a bare `id`) into a role
pub fn parse_role(s: &str) -> Result<Role, String> {
    let (id, name) = match s.split_once('=') {
        Some((id, name)) => (id.trim(), name.trim()),
        None => (s.trim(), s.trim()),
    };
    if id.is_empty() {
        return Err(format!("Invalid role: {:?}. Expected id=Name", s));
    }
    Ok(Role::new(id, name))
}

/// Parse `key=Label=href` into an action link already in the plugin row
pub fn parse_action_link(s: &str) -> Result<ActionLink, String> {
    let mut parts = s.splitn(3, '=').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(label), Some(href)) if !key.is_empty() && !label.is_empty() => {
            Ok(ActionLink {
                key: key.to_string(),
                label: label.to_string(),
                href: href.to_string(),
            })
        }
        _ => Err(format!("Invalid action link: {:?}. Expected key=Label=href", s)),
    }
}

pub fn list_fields() -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Label", "Kind", "Default"]);

    for field in fields() {
        let kind = match field.kind {
            FieldKind::Text => "text",
            FieldKind::RichText => "rich text",
            FieldKind::MultiSelect => "multi-select",
        };
        let default = match &field.default {
            SettingValue::Text(s) => format!("{:?}", s),
            SettingValue::List(items) => format!("{:?}", items),
        };
        table.add_row(vec![
            field.id.to_string(),
            field.label.to_string(),
            kind.to_string(),
            default,
        ]);
    }

    table.to_string()
}

pub async fn show(store: &SettingsStore) -> anyhow::Result<String> {
    let (blob, revision) = store.load_with_revision().await?;
    debug!("Loaded {} at revision {}", store.settings_name(), revision);
    Ok(serde_json::to_string_pretty(&blob)?)
}

/// Default-aware read. For the role list an empty `default` means no roles,
/// otherwise it is split on commas.
pub async fn get(store: &SettingsStore, key: &str, default: &str) -> anyhow::Result<String> {
    let fallback = match SettingKey::from_str(key) {
        Ok(known) if known.is_list() => SettingValue::List(
            default
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => SettingValue::from(default),
    };

    Ok(match store.get(key, fallback).await? {
        SettingValue::Text(s) => s,
        SettingValue::List(items) => items.join("\n"),
    })
}

pub async fn submit(
    store: &SettingsStore,
    body: &str,
    expect_revision: Option<i64>,
) -> anyhow::Result<String> {
    let raw = decode_form(store.settings_name(), body);
    let blob = match expect_revision {
        Some(revision) => store.save_if_unchanged(raw, revision).await,
        None => store.save(raw).await,
    }
    .context("Failed to save settings")?;

    Ok(serde_json::to_string_pretty(&blob)?)
}

pub async fn render(store: &SettingsStore, roles: &[Role]) -> anyhow::Result<String> {
    let blob = store.load().await?;
    let page = render_page(store.settings_name(), &blob, roles);
    Ok(serde_json::to_string_pretty(&page)?)
}

/// Print the plugin action row with the settings link in front, one link
/// per line
pub fn link(admin_url: &str, existing: Vec<ActionLink>) -> anyhow::Result<String> {
    let settings = settings_action_link(admin_url)
        .map_err(|e| anyhow!("Invalid admin URL {}: {}", admin_url, e))?;

    Ok(with_settings_link(settings, existing)
        .iter()
        .map(|link| format!("{}: {}", link.label, link.href))
        .collect::<Vec<_>>()
        .join("\n"))
}

pub async fn reset(store: &SettingsStore) -> anyhow::Result<String> {
    Ok(if store.reset().await? {
        format!("Removed stored settings for {}", store.settings_name())
    } else {
        format!("No stored settings for {}", store.settings_name())
    })
}
