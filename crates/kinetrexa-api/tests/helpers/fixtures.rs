//! Shared fixtures for integration tests.

use super::{api_path, TestApp, TEST_ADMIN_KEY};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

pub fn bearer(key: &str) -> String {
    format!("Bearer {}", key)
}

pub fn admin_bearer() -> String {
    bearer(TEST_ADMIN_KEY)
}

/// An internship end date safely in the past.
pub fn past_end_date() -> NaiveDate {
    (Utc::now() - Duration::days(30)).date_naive()
}

/// An internship end date safely in the future.
pub fn future_end_date() -> NaiveDate {
    (Utc::now() + Duration::days(30)).date_naive()
}

/// Create an internship via the admin endpoint; returns its id.
pub async fn create_internship(app: &TestApp, title: &str, end_date: NaiveDate) -> Uuid {
    let response = app
        .client()
        .post(&api_path("/admin/internships"))
        .add_header("Authorization", admin_bearer())
        .json(&json!({
            "title": title,
            "description": "Build and ship real features",
            "duration_weeks": 12,
            "start_date": end_date - Duration::days(84),
            "end_date": end_date,
        }))
        .await;

    assert_eq!(response.status_code(), 201, "body: {}", response.text());
    let body: Value = response.json();
    body["id"]
        .as_str()
        .expect("internship id")
        .parse()
        .expect("internship id is a uuid")
}

pub fn application_body(email: &str, internship_id: Uuid) -> Value {
    json!({
        "first_name": "Asha",
        "last_name": "Nair",
        "email": email,
        "phone": "+919876543210",
        "college": "NIT Calicut",
        "degree": "B.Tech CSE",
        "graduation_year": 2026,
        "skills": ["rust", "postgres"],
        "resume_url": "https://example.com/resume.pdf",
        "internship_id": internship_id,
    })
}

/// Submit an application; returns the public application id.
pub async fn submit_application(app: &TestApp, email: &str, internship_id: Uuid) -> String {
    let response = app
        .client()
        .post(&api_path("/applications"))
        .json(&application_body(email, internship_id))
        .await;

    assert_eq!(response.status_code(), 201, "body: {}", response.text());
    let body: Value = response.json();
    body["application_id"]
        .as_str()
        .expect("application_id")
        .to_string()
}

/// Set an application's status via the admin endpoint; returns the response body.
pub async fn set_status(app: &TestApp, application_id: &str, status: &str) -> Value {
    let response = app
        .client()
        .put(&api_path(&format!(
            "/admin/applications/{}/status",
            application_id
        )))
        .add_header("Authorization", admin_bearer())
        .json(&json!({ "status": status }))
        .await;

    assert_eq!(response.status_code(), 200, "body: {}", response.text());
    response.json()
}

/// Deposit a document for an application via the admin endpoint.
pub async fn deposit_document(app: &TestApp, kind: &str, application_id: &str) {
    let response = app
        .client()
        .post(&api_path(&format!(
            "/admin/documents/{}/{}",
            kind, application_id
        )))
        .add_header("Authorization", admin_bearer())
        .content_type("application/pdf")
        .bytes(minimal_pdf().into())
        .await;

    assert_eq!(response.status_code(), 201, "body: {}", response.text());
}

/// Smallest thing the deposit endpoint accepts as a PDF.
pub fn minimal_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\ntrailer\n<< /Root 1 0 R >>\n%%EOF\n".to_vec()
}
