//! Public verification integration tests.
//!
//! Run with: `cargo test -p kinetrexa-api --test verification_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::fixtures::{
    create_internship, future_end_date, past_end_date, set_status, submit_application,
};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_verify_status_mode() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "asha@example.com", internship_id).await;

    let response = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({
            "email": "asha@example.com",
            "application_id": application_id,
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["application_id"], Value::String(application_id));
    assert_eq!(body["applicant_name"], "Asha Nair");
    assert_eq!(body["domain"], "Full Stack Dev");
    assert_eq!(body["status"], "applied");
    assert_eq!(body["documents"]["offer_letter"]["unlocked"], false);
    // The projection never exposes contact details.
    assert!(body.get("phone").is_none());
    assert!(body.get("resume_url").is_none());
}

#[tokio::test]
async fn test_two_factor_masking() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "asha@example.com", internship_id).await;

    let wrong_email = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({
            "email": "other@example.com",
            "application_id": application_id,
        }))
        .await;

    let wrong_id = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({
            "email": "asha@example.com",
            "application_id": "KT-2026-ZZZZZZ",
        }))
        .await;

    // Neither half of the pair is distinguishable from the other being wrong.
    assert_eq!(wrong_email.status_code(), 404);
    assert_eq!(wrong_id.status_code(), 404);
    let wrong_email_body: Value = wrong_email.json();
    let wrong_id_body: Value = wrong_id.json();
    assert_eq!(wrong_email_body, wrong_id_body);
}

async fn verify_status(app: &helpers::TestApp, email: &str, application_id: &str) -> Value {
    let response = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({ "email": email, "application_id": application_id }))
        .await;
    assert_eq!(response.status_code(), 200, "body: {}", response.text());
    response.json()
}

#[tokio::test]
async fn test_happy_path_lifecycle() {
    let app = setup_test_app().await;
    // Program already over, so completion unlocks the certificate immediately.
    let internship_id = create_internship(&app, "Full Stack Dev", past_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    // applied: nothing unlocked
    let body = verify_status(&app, "a@x.com", &application_id).await;
    assert_eq!(body["documents"]["offer_letter"]["unlocked"], false);
    assert_eq!(body["documents"]["certificate"]["unlocked"], false);

    // selected: offer letter unlocks
    set_status(&app, &application_id, "selected").await;
    let body = verify_status(&app, "a@x.com", &application_id).await;
    assert_eq!(body["documents"]["offer_letter"]["unlocked"], true);
    assert_eq!(body["documents"]["certificate"]["unlocked"], false);

    // completed with the end date in the past: certificate unlocks and an id exists
    let updated = set_status(&app, &application_id, "completed").await;
    let certificate_id = updated["certificate_id"]
        .as_str()
        .expect("certificate id minted on completion")
        .to_string();
    assert!(certificate_id.starts_with("KTC-"));

    let body = verify_status(&app, "a@x.com", &application_id).await;
    assert_eq!(body["documents"]["offer_letter"]["unlocked"], true);
    assert_eq!(body["documents"]["certificate"]["unlocked"], true);
    assert_eq!(body["certificate_id"], Value::String(certificate_id.clone()));

    // certificate mode returns a valid, PII-free projection
    let response = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({ "certificate_id": certificate_id }))
        .await;
    assert_eq!(response.status_code(), 200);
    let cert: Value = response.json();
    assert_eq!(cert["valid"], true);
    assert_eq!(cert["applicant_name"], "Asha Nair");
    assert_eq!(cert["domain"], "Full Stack Dev");
    assert!(cert.get("phone").is_none());
    assert!(cert.get("resume_url").is_none());
}

#[tokio::test]
async fn test_early_completion_keeps_certificate_locked() {
    let app = setup_test_app().await;
    // Program ends in the future: completed status alone is not enough.
    let internship_id = create_internship(&app, "Full Stack Dev", future_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    let updated = set_status(&app, &application_id, "completed").await;
    let certificate_id = updated["certificate_id"]
        .as_str()
        .expect("certificate id is still minted")
        .to_string();

    let response = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({ "email": "a@x.com", "application_id": application_id }))
        .await;
    let body: Value = response.json();
    assert_eq!(body["status"], "completed");
    assert_eq!(body["documents"]["certificate"]["unlocked"], false);

    // Certificate mode resolves, but reports not-yet-valid.
    let response = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({ "certificate_id": certificate_id }))
        .await;
    assert_eq!(response.status_code(), 200);
    let cert: Value = response.json();
    assert_eq!(cert["valid"], false);
}

#[tokio::test]
async fn test_certificate_id_is_not_regenerated() {
    let app = setup_test_app().await;
    let internship_id = create_internship(&app, "Full Stack Dev", past_end_date()).await;
    let application_id = submit_application(&app, "a@x.com", internship_id).await;

    let first = set_status(&app, &application_id, "completed").await;
    let first_id = first["certificate_id"].as_str().expect("id").to_string();

    // Bounce the status; completing again must keep the original id.
    set_status(&app, &application_id, "selected").await;
    let second = set_status(&app, &application_id, "completed").await;
    let second_id = second["certificate_id"].as_str().expect("id").to_string();

    assert_eq!(first_id, second_id);
}

#[tokio::test]
async fn test_verify_rejects_unrecognized_body() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/applications/verify"))
        .json(&json!({ "something": "else" }))
        .await;

    assert_eq!(response.status_code(), 400);
}
