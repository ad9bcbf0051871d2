// ABOUTME: Notification settings management
// ABOUTME: Default-aware settings store, submission validator, field registry and renderer

pub mod error;
pub mod fields;
pub mod form;
pub mod render;
pub mod sanitize;
pub mod store;
pub mod types;
pub mod validation;

// Re-export main types
pub use error::{SettingsError, UnknownSettingKey};
pub use fields::{fields, FieldKind, FieldSpec, Placeholder, PLACEHOLDERS, SECTION_TITLE};
pub use form::decode_form;
pub use render::{
    field_name, multi_field_name, render_field, render_page, settings_action_link,
    with_settings_link, ActionLink, FieldControl, RenderedField, RenderedSection, Role,
    SelectOption,
};
pub use sanitize::sanitize_text_field;
pub use store::SettingsStore;
pub use types::{RawSubmission, SettingKey, SettingValue, SettingsBlob};
pub use validation::{validate, SettingsValidator};
