// ABOUTME: Integration tests for option store backends
// ABOUTME: Runs the same get/set/revision checks against SQLite and memory stores

use herald_storage::{MemoryOptionStore, OptionStore, SqliteOptionStore, StorageError};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Helper to create an in-memory SQLite store for testing
async fn create_sqlite_store() -> SqliteOptionStore {
    SqliteOptionStore::connect("sqlite::memory:").await.unwrap()
}

async fn check_missing_option_is_none(store: &dyn OptionStore) {
    assert!(store.get_option("notify_users_e_mail").await.unwrap().is_none());
}

async fn check_set_then_get(store: &dyn OptionStore) {
    let value = json!({"send_to": "a@x.com", "send_to_users": ["editor"]});
    let stored = store.set_option("notify_users_e_mail", &value).await.unwrap();
    assert_eq!(stored.revision, 1);
    assert_eq!(stored.value, value);

    let fetched = store
        .get_option("notify_users_e_mail")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.name, "notify_users_e_mail");
    assert_eq!(fetched.value, value);
    assert_eq!(fetched.revision, 1);
}

async fn check_overwrite_replaces_wholesale(store: &dyn OptionStore) {
    store
        .set_option("opts", &json!({"body_post": "old body"}))
        .await
        .unwrap();
    let stored = store
        .set_option("opts", &json!({"subject_post": "Hi"}))
        .await
        .unwrap();

    assert_eq!(stored.revision, 2);
    let fetched = store.get_option("opts").await.unwrap().unwrap();
    assert_eq!(fetched.value, json!({"subject_post": "Hi"}));
}

async fn check_revision_guard(store: &dyn OptionStore) {
    // Creating requires expected revision 0
    let created = store
        .set_option_if_revision("opts", &json!({"a": "1"}), 0)
        .await
        .unwrap();
    assert_eq!(created.revision, 1);

    // A second create attempt conflicts
    match store
        .set_option_if_revision("opts", &json!({"a": "2"}), 0)
        .await
    {
        Err(StorageError::Conflict {
            name,
            expected,
            actual,
        }) => {
            assert_eq!(name, "opts");
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected Conflict error, got {:?}", other),
    }

    let updated = store
        .set_option_if_revision("opts", &json!({"a": "3"}), 1)
        .await
        .unwrap();
    assert_eq!(updated.revision, 2);

    // Stale revision is rejected and the stored value is untouched
    assert!(matches!(
        store
            .set_option_if_revision("opts", &json!({"a": "4"}), 1)
            .await,
        Err(StorageError::Conflict { actual: 2, .. })
    ));
    let fetched = store.get_option("opts").await.unwrap().unwrap();
    assert_eq!(fetched.value, json!({"a": "3"}));
}

async fn check_delete(store: &dyn OptionStore) {
    assert!(!store.delete_option("opts").await.unwrap());
    store.set_option("opts", &json!({})).await.unwrap();
    assert!(store.delete_option("opts").await.unwrap());
    assert!(store.get_option("opts").await.unwrap().is_none());

    // Revisions restart after deletion
    let stored = store.set_option("opts", &json!({})).await.unwrap();
    assert_eq!(stored.revision, 1);
}

async fn check_empty_name_rejected(store: &dyn OptionStore) {
    match store.set_option("", &json!({})).await {
        Err(StorageError::InvalidInput(msg)) => assert!(msg.contains("empty")),
        other => panic!("Expected InvalidInput error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sqlite_missing_option_is_none() {
    check_missing_option_is_none(&create_sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_missing_option_is_none() {
    check_missing_option_is_none(&MemoryOptionStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_set_then_get() {
    check_set_then_get(&create_sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_set_then_get() {
    check_set_then_get(&MemoryOptionStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_overwrite_replaces_wholesale() {
    check_overwrite_replaces_wholesale(&create_sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_overwrite_replaces_wholesale() {
    check_overwrite_replaces_wholesale(&MemoryOptionStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_revision_guard() {
    check_revision_guard(&create_sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_revision_guard() {
    check_revision_guard(&MemoryOptionStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_delete() {
    check_delete(&create_sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_delete() {
    check_delete(&MemoryOptionStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_empty_name_rejected() {
    check_empty_name_rejected(&create_sqlite_store().await).await;
}

#[tokio::test]
async fn test_memory_empty_name_rejected() {
    check_empty_name_rejected(&MemoryOptionStore::new()).await;
}

#[tokio::test]
async fn test_sqlite_options_survive_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("herald.db").display());

    {
        let store = SqliteOptionStore::connect(&url).await.unwrap();
        store
            .set_option("opts", &json!({"txt_footer": "<p>bye</p>"}))
            .await
            .unwrap();
        store.pool().close().await;
    }

    let store = SqliteOptionStore::connect(&url).await.unwrap();
    let fetched = store.get_option("opts").await.unwrap().unwrap();
    assert_eq!(fetched.value, json!({"txt_footer": "<p>bye</p>"}));
    assert_eq!(fetched.revision, 1);
}

#[tokio::test]
async fn test_sqlite_corrupt_value_is_json_error() {
    let store = create_sqlite_store().await;
    sqlx::query("INSERT INTO options (name, value) VALUES ('opts', 'not json')")
        .execute(store.pool())
        .await
        .unwrap();

    assert!(matches!(
        store.get_option("opts").await,
        Err(StorageError::Json(_))
    ));
}
