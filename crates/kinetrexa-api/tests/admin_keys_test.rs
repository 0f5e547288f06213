//! Admin key management integration tests.
//!
//! Run with: `cargo test -p kinetrexa-api --test admin_keys_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::fixtures::{admin_bearer, bearer};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_admin_key_lifecycle() {
    let app = setup_test_app().await;

    // Create a DB-managed key using the bootstrap key.
    let response = app
        .client()
        .post(&api_path("/admin/keys"))
        .add_header("Authorization", admin_bearer())
        .json(&json!({ "name": "Admin panel" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let created: Value = response.json();
    let raw_key = created["api_key"].as_str().expect("raw key").to_string();
    let key_id = created["id"].as_str().expect("key id").to_string();
    assert!(raw_key.starts_with("ka_live_"));

    // The new key works for admin calls.
    let response = app
        .client()
        .get(&api_path("/admin/applications"))
        .add_header("Authorization", bearer(&raw_key))
        .await;
    assert_eq!(response.status_code(), 200);

    // Listing never exposes hashes or raw keys.
    let response = app
        .client()
        .get(&api_path("/admin/keys"))
        .add_header("Authorization", admin_bearer())
        .await;
    assert_eq!(response.status_code(), 200);
    let keys: Value = response.json();
    let entry = &keys.as_array().expect("array")[0];
    assert!(entry.get("key_hash").is_none());
    assert!(entry.get("api_key").is_none());
    assert_eq!(entry["name"], "Admin panel");

    // Revoked keys stop working.
    let response = app
        .client()
        .delete(&api_path(&format!("/admin/keys/{}", key_id)))
        .add_header("Authorization", admin_bearer())
        .await;
    assert_eq!(response.status_code(), 204);

    let response = app
        .client()
        .get(&api_path("/admin/applications"))
        .add_header("Authorization", bearer(&raw_key))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_create_key_rejects_empty_name() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/admin/keys"))
        .add_header("Authorization", admin_bearer())
        .json(&json!({ "name": "   " }))
        .await;

    assert_eq!(response.status_code(), 400);
}
