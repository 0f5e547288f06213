use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kinetrexa_core::models::{
    ApplicationResponse, CreateApplicationRequest, TrackedApplication,
};
use kinetrexa_core::validation::normalize_email;
use kinetrexa_core::AppError;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/applications",
    tag = "applications",
    request_body = CreateApplicationRequest,
    responses(
        (status = 201, description = "Application created", body = ApplicationResponse),
        (status = 400, description = "Invalid applicant fields", body = ErrorResponse),
        (status = 404, description = "Unknown internship", body = ErrorResponse),
        (status = 409, description = "Already applied for this domain", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request), fields(internship_id = %request.internship_id, operation = "submit_application"))]
pub async fn submit_application(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateApplicationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let internship = state
        .db
        .internships
        .get(request.internship_id)
        .await?
        .filter(|i| i.is_active)
        .ok_or_else(|| AppError::NotFound("Internship not found".to_string()))?;

    let email = normalize_email(&request.email);

    // Advisory duplicate check for a friendly 409; the unique index in the
    // database is the real guarantee under concurrent submissions.
    if let Some(existing) = state
        .db
        .applications
        .find_duplicate(&email, request.internship_id)
        .await?
    {
        tracing::debug!(
            public_id = %existing.public_id,
            "Duplicate application attempt"
        );
        return Err(AppError::Conflict(
            "You have already applied for this domain".to_string(),
        )
        .into());
    }

    let application = state.db.applications.create(&email, &request).await?;

    tracing::info!(
        public_id = %application.public_id,
        internship = %internship.title,
        "Application submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/track/{email}",
    tag = "applications",
    params(
        ("email" = String, Path, description = "Applicant email")
    ),
    responses(
        (status = 200, description = "Applications for this email", body = [TrackedApplication])
    )
)]
#[tracing::instrument(skip(state, email), fields(operation = "track_applications"))]
pub async fn track_applications(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let email = normalize_email(&email);

    let applications = state
        .db
        .applications
        .list_by_email_with_domain(&email)
        .await?;

    let tracked: Vec<TrackedApplication> = applications
        .into_iter()
        .map(|(application, domain)| TrackedApplication {
            application_id: application.public_id,
            internship_id: application.internship_id,
            domain,
            status: application.status,
            status_updated_at: application.status_updated_at,
            applied_at: application.created_at,
        })
        .collect();

    Ok(Json(tracked))
}
