use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use tobacco_wishlist::storage::{open_store, JsonFileStore, KeyValueStore, StorageBackend};

#[tokio::test]
async fn both_backends_share_semantics() {
    let dir = tempfile::tempdir().unwrap();
    for (backend, file) in [
        (StorageBackend::Json, "kv.json"),
        (StorageBackend::Sqlite, "kv.db"),
    ] {
        let store = open_store(backend, &dir.path().join(file)).await.unwrap();
        assert_ok!(store.health_check().await);

        assert_eq!(store.get("wishlist:1").await.unwrap(), None);
        store.set("wishlist:1", json!([{"tobaccoId": "1"}])).await.unwrap();
        assert_eq!(
            store.get("wishlist:1").await.unwrap(),
            Some(json!([{"tobaccoId": "1"}]))
        );
        assert!(store.delete("wishlist:1").await.unwrap(), "{backend}");
        assert!(!store.delete("wishlist:1").await.unwrap(), "{backend}");
    }
}

#[tokio::test]
async fn json_store_survives_reopen_and_rejects_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/kv.json");

    let store = JsonFileStore::open(&path).await.unwrap();
    store.set("wishlist:9", json!(["x"])).await.unwrap();
    drop(store);

    let reopened = JsonFileStore::open(&path).await.unwrap();
    assert_eq!(reopened.get("wishlist:9").await.unwrap(), Some(json!(["x"])));

    tokio::fs::write(&path, b"{ not json").await.unwrap();
    assert_err!(JsonFileStore::open(&path).await);
}
