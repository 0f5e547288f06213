use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{header, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use futures::StreamExt;
use kinetrexa_core::models::{Application, DocumentAccess, DocumentKind, Internship};
use kinetrexa_core::validation::normalize_email;
use kinetrexa_core::AppError;
use kinetrexa_storage::document_key;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

/// Download misses are masked the same way as the verify endpoint: a wrong
/// email and a wrong application id are indistinguishable.
const NO_MATCHING_APPLICATION: &str = "No matching application found";

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub email: Option<String>,
}

fn parse_kind(kind: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::from_str(kind).map_err(|_| {
        AppError::InvalidInput(format!(
            "Unknown document kind '{}' (expected offer-letter, task-assignment, or certificate)",
            kind
        ))
    })
}

/// Load an application (two-factor: public id + email) and its internship.
async fn load_gated_application(
    state: &AppState,
    application_id: &str,
    email: &str,
) -> Result<(Application, Internship), HttpAppError> {
    let application = state
        .db
        .applications
        .find_by_email_and_public_id(email, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_MATCHING_APPLICATION.to_string()))?;

    let internship = state
        .db
        .internships
        .get(application.internship_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_MATCHING_APPLICATION.to_string()))?;

    Ok((application, internship))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{kind}/{application_id}",
    tag = "documents",
    params(
        ("kind" = String, Path, description = "offer-letter | task-assignment | certificate"),
        ("application_id" = String, Path, description = "Public application id"),
        ("email" = String, Query, description = "Applicant email (second lookup factor)")
    ),
    responses(
        (status = 200, description = "Document file", content_type = "application/pdf"),
        (status = 403, description = "Document not unlocked yet", body = ErrorResponse),
        (status = 404, description = "No matching application or document not generated", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(application_id = %application_id, kind = %kind, operation = "download_document")
)]
pub async fn download_document(
    State(state): State<Arc<AppState>>,
    Path((kind, application_id)): Path<(String, String)>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let kind = parse_kind(&kind)?;
    let email = query
        .email
        .as_deref()
        .map(normalize_email)
        .ok_or_else(|| AppError::InvalidInput("email query parameter is required".to_string()))?;

    let (application, internship) = load_gated_application(&state, &application_id, &email).await?;

    // The gate is always re-evaluated server-side from the freshly loaded
    // row; a client-claimed "unlocked" state means nothing here.
    let access = DocumentAccess::evaluate(
        application.status,
        application.task_assignment_enabled,
        internship.end_date,
        Utc::now(),
    );
    if !access.allows(kind) {
        return Err(AppError::NotUnlocked(format!(
            "The {} is not yet available for this application",
            kind
        ))
        .into());
    }

    let storage_key = document_key(&application.public_id, kind);
    let stream = state
        .documents
        .storage
        .download_stream(&storage_key)
        .await?;

    let first_download = state
        .db
        .applications
        .record_download(application.id, kind)
        .await?;

    tracing::info!(
        public_id = %application.public_id,
        kind = %kind,
        first_download,
        "Streaming document"
    );

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let content_disposition = format!(
        "attachment; filename=\"{}-{}.pdf\"",
        application.public_id, kind
    );

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .header(header::CACHE_CONTROL, "private, no-store")
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositDocumentResponse {
    pub application_id: String,
    pub kind: DocumentKind,
    pub storage_key: String,
    pub size_bytes: usize,
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/documents/{kind}/{application_id}",
    tag = "admin",
    params(
        ("kind" = String, Path, description = "offer-letter | task-assignment | certificate"),
        ("application_id" = String, Path, description = "Public application id")
    ),
    request_body(content = String, description = "Raw PDF bytes", content_type = "application/pdf"),
    responses(
        (status = 201, description = "Document stored", body = DepositDocumentResponse),
        (status = 400, description = "Body is not a PDF", body = ErrorResponse),
        (status = 404, description = "Unknown application", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(
    skip(state, body),
    fields(application_id = %application_id, kind = %kind, admin = %admin.key_name, operation = "deposit_document")
)]
pub async fn deposit_document(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path((kind, application_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpAppError> {
    let kind = parse_kind(&kind)?;

    if !body.starts_with(b"%PDF") {
        return Err(AppError::InvalidInput("Document body must be a PDF".to_string()).into());
    }

    let application = state
        .db
        .applications
        .get_by_public_id(&application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let storage_key = document_key(&application.public_id, kind);
    let size_bytes = body.len();

    state
        .documents
        .storage
        .upload_with_key(&storage_key, body.to_vec())
        .await?;

    tracing::info!(
        public_id = %application.public_id,
        kind = %kind,
        size_bytes,
        "Document deposited"
    );

    Ok((
        StatusCode::CREATED,
        Json(DepositDocumentResponse {
            application_id: application.public_id,
            kind,
            storage_key,
            size_bytes,
        }),
    ))
}
