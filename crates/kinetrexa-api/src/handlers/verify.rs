use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use kinetrexa_core::models::{CertificateProjection, StatusProjection, VerifyRequest};
use kinetrexa_core::validation::normalize_email;
use kinetrexa_core::AppError;
use std::sync::Arc;

/// Status mode masks which half of the (email, application id) pair was
/// wrong: every miss produces this exact message.
const NO_MATCHING_APPLICATION: &str = "No matching application found";

#[utoipa::path(
    post,
    path = "/api/v1/applications/verify",
    tag = "verification",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification projection"),
        (status = 400, description = "Body matches neither verification mode", body = ErrorResponse),
        (status = 404, description = "No matching record", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(operation = "verify"))]
pub async fn verify(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<VerifyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    match request {
        VerifyRequest::Status {
            email,
            application_id,
        } => {
            let projection = verify_by_email_and_id(&state, &email, &application_id).await?;
            Ok(Json(serde_json::to_value(projection).map_err(AppError::from)?))
        }
        VerifyRequest::Certificate { certificate_id } => {
            let projection = verify_by_certificate_id(&state, &certificate_id).await?;
            Ok(Json(serde_json::to_value(projection).map_err(AppError::from)?))
        }
    }
}

async fn verify_by_email_and_id(
    state: &AppState,
    email: &str,
    application_id: &str,
) -> Result<StatusProjection, HttpAppError> {
    let email = normalize_email(email);

    let application = state
        .db
        .applications
        .find_by_email_and_public_id(&email, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_MATCHING_APPLICATION.to_string()))?;

    let internship = state
        .db
        .internships
        .get(application.internship_id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_MATCHING_APPLICATION.to_string()))?;

    Ok(StatusProjection::build(application, &internship, Utc::now()))
}

async fn verify_by_certificate_id(
    state: &AppState,
    certificate_id: &str,
) -> Result<CertificateProjection, HttpAppError> {
    let application = state
        .db
        .applications
        .find_by_certificate_id(certificate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No matching certificate found".to_string()))?;

    let internship = state
        .db
        .internships
        .get(application.internship_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No matching certificate found".to_string()))?;

    Ok(CertificateProjection::build(
        application,
        &internship,
        Utc::now(),
    ))
}
