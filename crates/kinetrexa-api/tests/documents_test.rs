//! Document gating and download integration tests.
//!
//! Run with: `cargo test -p kinetrexa-api --test documents_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use chrono::{DateTime, Utc};
use helpers::fixtures::{
    admin_bearer, create_internship, deposit_document, future_end_date, past_end_date, set_status,
    submit_application,
};
use helpers::{api_path, setup_test_app, TestApp};
use serde_json::Value;

fn download_path(kind: &str, application_id: &str, email: &str) -> String {
    api_path(&format!(
        "/documents/{}/{}?email={}",
        kind, application_id, email
    ))
}

async fn certificate_downloaded_at(app: &TestApp, application_id: &str) -> Option<DateTime<Utc>> {
    sqlx::query_scalar("SELECT certificate_downloaded_at FROM applications WHERE public_id = $1")
        .bind(application_id)
        .fetch_one(app.pool())
        .await
        .expect("query downloaded_at")
}

#[tokio::test]
async fn test_locked_document_is_forbidden() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    deposit_document(&app, "offer-letter", &application_id).await;

    // Still "applied": the deposited bytes exist, the gate does not care.
    let response = app
        .client()
        .get(&download_path("offer-letter", &application_id, "a@x.com"))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body["code"], "DOCUMENT_LOCKED");
    assert!(body["error"]
        .as_str()
        .expect("error")
        .contains("not yet available"));
}

#[tokio::test]
async fn test_unlocked_document_streams() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    deposit_document(&app, "offer-letter", &application_id).await;
    set_status(&app, &application_id, "selected").await;

    let response = app
        .client()
        .get(&download_path("offer-letter", &application_id, "a@x.com"))
        .await;

    assert_eq!(response.status_code(), 200);
    let content_type = response
        .headers()
        .get("content-type")
        .expect("content type header")
        .to_str()
        .expect("header is ascii")
        .to_string();
    assert_eq!(content_type, "application/pdf");
    assert!(response.as_bytes().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_unlocked_but_ungenerated_document_is_not_found() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    set_status(&app, &application_id, "selected").await;

    // Gate open, but the rendering collaborator has not deposited bytes yet.
    let response = app
        .client()
        .get(&download_path("offer-letter", &application_id, "a@x.com"))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Document is not yet available");
}

#[tokio::test]
async fn test_task_assignment_follows_admin_flag() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    deposit_document(&app, "task-assignment", &application_id).await;

    let response = app
        .client()
        .get(&download_path("task-assignment", &application_id, "a@x.com"))
        .await;
    assert_eq!(response.status_code(), 403);

    // Enable the task assignment; status stays "applied".
    let response = app
        .client()
        .put(&api_path(&format!(
            "/admin/applications/{}/task",
            application_id
        )))
        .add_header("Authorization", admin_bearer())
        .json(&serde_json::json!({ "enabled": true, "details": "Build a URL shortener" }))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .client()
        .get(&download_path("task-assignment", &application_id, "a@x.com"))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_download_timestamp_is_idempotent() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", past_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    deposit_document(&app, "certificate", &application_id).await;
    set_status(&app, &application_id, "completed").await;

    let first = app
        .client()
        .get(&download_path("certificate", &application_id, "a@x.com"))
        .await;
    assert_eq!(first.status_code(), 200);
    let after_first = certificate_downloaded_at(&app, &application_id)
        .await
        .expect("timestamp set on first download");

    let second = app
        .client()
        .get(&download_path("certificate", &application_id, "a@x.com"))
        .await;
    assert_eq!(second.status_code(), 200);
    let after_second = certificate_downloaded_at(&app, &application_id)
        .await
        .expect("timestamp still set");

    // Repeat downloads succeed but keep the first timestamp.
    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn test_download_requires_matching_email() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    deposit_document(&app, "offer-letter", &application_id).await;
    set_status(&app, &application_id, "selected").await;

    let response = app
        .client()
        .get(&download_path("offer-letter", &application_id, "other@x.com"))
        .await;

    // Masked exactly like a wrong application id.
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_unknown_document_kind_rejected() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    let response = app
        .client()
        .get(&download_path("resume", &application_id, "a@x.com"))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_deposit_rejects_non_pdf() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    let response = app
        .client()
        .post(&api_path(&format!(
            "/admin/documents/offer-letter/{}",
            application_id
        )))
        .add_header("Authorization", admin_bearer())
        .content_type("application/pdf")
        .bytes(b"<html>not a pdf</html>".to_vec().into())
        .await;

    assert_eq!(response.status_code(), 400);
}
