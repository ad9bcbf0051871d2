// ABOUTME: Tests for herald subcommand implementations
// ABOUTME: Runs commands against an in-memory option store

use std::sync::Arc;

use crate::commands::{self, parse_action_link, parse_role};
use crate::open_settings;
use herald_config::Config;
use herald_settings::{ActionLink, Role, SettingsStore};
use herald_storage::MemoryOptionStore;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn store() -> SettingsStore {
    SettingsStore::new("opts", Arc::new(MemoryOptionStore::new()))
}

#[test]
fn test_list_fields_shows_every_field() {
    let output = commands::list_fields();
    for id in [
        "send_to",
        "send_to_users",
        "subject_post",
        "body_post",
        "subject_page",
        "body_page",
        "subject_comment",
        "body_comment",
        "txt_footer",
    ] {
        assert!(output.contains(id), "missing {}", id);
    }
    assert!(output.contains("multi-select"));
}

#[rstest]
#[case("editor=Editor", Ok(Role::new("editor", "Editor")))]
#[case("shop_manager = Shop Manager", Ok(Role::new("shop_manager", "Shop Manager")))]
#[case("author", Ok(Role::new("author", "author")))]
#[case("=Nobody", Err(()))]
fn test_parse_role(#[case] input: &str, #[case] expected: Result<Role, ()>) {
    assert_eq!(parse_role(input).map_err(|_| ()), expected);
}

#[tokio::test]
async fn test_get_uses_default_until_submitted() {
    let store = store();

    assert_eq!(
        commands::get(&store, "send_to", "nobody@example.com")
            .await
            .unwrap(),
        "nobody@example.com"
    );
    assert_eq!(
        commands::get(&store, "send_to_users", "administrator, editor")
            .await
            .unwrap(),
        "administrator\neditor"
    );

    commands::submit(&store, "opts[send_to]=ops%40example.com", None)
        .await
        .unwrap();
    assert_eq!(
        commands::get(&store, "send_to", "nobody@example.com")
            .await
            .unwrap(),
        "ops@example.com"
    );
}

#[tokio::test]
async fn test_submit_prints_validated_blob() {
    let store = store();
    let output = commands::submit(
        &store,
        "opts[send_to_users][]=%3Ci%3Eeditor%3C%2Fi%3E&opts[subject_post]=Hi",
        None,
    )
    .await
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"send_to_users": ["editor"], "subject_post": "Hi"})
    );
    assert_eq!(
        commands::show(&store).await.unwrap(),
        output,
        "show prints what submit stored"
    );
}

#[tokio::test]
async fn test_submit_with_stale_revision_fails() {
    let store = store();
    commands::submit(&store, "opts[send_to]=a", Some(0))
        .await
        .unwrap();

    let err = commands::submit(&store, "opts[send_to]=b", Some(0))
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Revision conflict"));
    assert_eq!(commands::get(&store, "send_to", "").await.unwrap(), "a");
}

#[tokio::test]
async fn test_render_outputs_page_json() {
    let store = store();
    commands::submit(&store, "opts[send_to_users][]=editor", None)
        .await
        .unwrap();

    let output = commands::render(&store, &commands::default_roles())
        .await
        .unwrap();
    let page: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(page["title"], "Email Settings");
    assert_eq!(page["fields"].as_array().unwrap().len(), 9);
    let options = &page["fields"][1]["control"]["options"];
    assert_eq!(options[1]["value"], "editor");
    assert_eq!(options[1]["selected"], true);
    assert_eq!(options[0]["selected"], false);
}

#[tokio::test]
async fn test_reset_reports_whether_anything_was_removed() {
    let store = store();
    assert_eq!(
        commands::reset(&store).await.unwrap(),
        "No stored settings for opts"
    );
    commands::submit(&store, "opts[send_to]=a", None)
        .await
        .unwrap();
    assert_eq!(
        commands::reset(&store).await.unwrap(),
        "Removed stored settings for opts"
    );
}

#[test]
fn test_link_points_at_settings_page() {
    assert_eq!(
        commands::link("https://example.com/wp-admin/", Vec::new()).unwrap(),
        "Settings: https://example.com/wp-admin/options-general.php?page=notify-users-e-mail"
    );
    assert!(commands::link("::", Vec::new()).is_err());
}

#[test]
fn test_link_puts_settings_before_existing_actions() {
    let deactivate =
        parse_action_link("deactivate=Deactivate=plugins.php?action=deactivate").unwrap();
    let edit = parse_action_link("edit=Edit=plugin-editor.php").unwrap();

    assert_eq!(
        commands::link("https://example.com/wp-admin", vec![deactivate, edit]).unwrap(),
        "Settings: https://example.com/wp-admin/options-general.php?page=notify-users-e-mail\n\
         Deactivate: plugins.php?action=deactivate\n\
         Edit: plugin-editor.php"
    );
}

#[rstest]
#[case(
    "deactivate=Deactivate=plugins.php?action=deactivate&plugin=herald",
    Ok(ActionLink {
        key: "deactivate".to_string(),
        label: "Deactivate".to_string(),
        href: "plugins.php?action=deactivate&plugin=herald".to_string(),
    })
)]
#[case("edit=Edit", Err(()))]
#[case("=Edit=x.php", Err(()))]
fn test_parse_action_link(#[case] input: &str, #[case] expected: Result<ActionLink, ()>) {
    assert_eq!(parse_action_link(input).map_err(|_| ()), expected);
}

#[tokio::test]
async fn test_open_settings_uses_configured_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        settings_name: "opts".to_string(),
        database_url: format!("sqlite://{}?mode=rwc", dir.path().join("h.db").display()),
        admin_url: "http://localhost/wp-admin/".to_string(),
    };

    let store = open_settings(&config).await.unwrap();
    commands::submit(&store, "opts[txt_footer]=bye", None)
        .await
        .unwrap();

    let reopened = open_settings(&config).await.unwrap();
    assert_eq!(
        commands::get(&reopened, "txt_footer", "").await.unwrap(),
        "bye"
    );
}
