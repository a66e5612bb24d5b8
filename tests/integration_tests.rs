//! Integration tests for the firebase-store library

use firebase_store::prelude::*;
use serde_json::json;

#[test]
fn test_library_version() {
    assert!(!firebase_store::VERSION.is_empty());
    assert_eq!(firebase_store::CRATE_NAME, "firebase-store");
}

#[tokio::test]
async fn test_memory_database_backend() {
    let db = MemoryDatabase::new();

    db.set("settings.volume", json!(50)).await.expect("Failed to set value");
    let retrieved = db.get("settings.volume").await.expect("Failed to get value");
    assert_eq!(retrieved, Some(json!(50)));

    db.push("history", json!("track-1")).await.expect("Failed to push value");
    assert_eq!(
        db.get("history").await.expect("Failed to get history"),
        Some(json!(["track-1"]))
    );

    assert!(db.delete("settings.volume").await.expect("Failed to delete value"));
    assert_eq!(db.get("settings.volume").await.expect("Failed to get value"), None);
}

#[tokio::test]
async fn test_keyed_store_over_memory_transport() {
    let options = ManagerOptions {
        client_id: Some("user.1#a".to_string()),
        ..Default::default()
    };
    let store = KeyedStore::new(MemoryTransport::new(), "https://db.example.com", &options);

    store.set("settings.volume", &42).await.expect("Failed to set value");
    assert_eq!(
        store
            .transport()
            .stored("https://db.example.com/user_1_a/settings/volume.json")
            .await,
        Some(json!(42))
    );
    assert_eq!(
        store.get("settings.volume").await.expect("Failed to get value"),
        Some(json!(42))
    );

    store.set("settings.volume", &json!([1, 2])).await.expect("Failed to set value");
    store.push("settings.volume", &3).await.expect("Failed to push value");
    assert_eq!(
        store.get("settings.volume").await.expect("Failed to get value"),
        Some(json!([1, 2, 3]))
    );
}

#[tokio::test]
async fn test_plugin_swaps_database_backend() {
    let mut host = PluginHost::new();
    assert_eq!(host.structures().database_backend(), StorageBackend::Memory);

    let missing = host.load(Box::new(FirebasePlugin::new(PluginOptions::default())));
    assert!(matches!(missing, Err(Error::Configuration { .. })));

    host.load(Box::new(FirebasePlugin::new(PluginOptions::with_url(
        "https://my-app.firebaseio.com",
    ))))
    .expect("Failed to load plugin");
    assert_eq!(host.structures().database_backend(), StorageBackend::Firebase);

    host.unload(FirebasePlugin::NAME).expect("Failed to unload plugin");
    assert_eq!(host.structures().database_backend(), StorageBackend::Memory);
}

#[test]
fn test_error_types() {
    let error = Error::from(StorageError::NotAnArray {
        key: "volume".to_string(),
    });
    assert!(error.to_string().contains("Storage error"));
    assert!(error.to_string().contains("volume"));
}
