use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use kinetrexa_core::models::{Application, ApplicationResponse, ApplicationStatus};
use kinetrexa_core::validation::validate_phone;
use kinetrexa_core::{ids, AppError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

async fn get_by_public_id(
    state: &AppState,
    application_id: &str,
) -> Result<Application, HttpAppError> {
    state
        .db
        .applications
        .get_by_public_id(application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()).into())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// New status, case-insensitive ("Selected" and "selected" both work).
    pub status: String,
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/applications/{application_id}/status",
    tag = "admin",
    request_body = UpdateStatusRequest,
    params(
        ("application_id" = String, Path, description = "Public application id")
    ),
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
        (status = 404, description = "Unknown application", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(
    skip(state, request),
    fields(application_id = %application_id, admin = %admin.key_name, operation = "update_status")
)]
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(application_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let status = ApplicationStatus::from_str(&request.status).map_err(|_| {
        AppError::InvalidInput(format!(
            "Unknown status '{}' (expected applied, shortlisted, selected, rejected, or completed)",
            request.status
        ))
    })?;

    let application = get_by_public_id(&state, &application_id).await?;

    // A candidate certificate id is always supplied; the statement only
    // assigns it when the new status is `completed` and none exists yet.
    let certificate_candidate = ids::generate_certificate_id();

    let updated = state
        .db
        .applications
        .set_status(application.id, status, &certificate_candidate)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    tracing::info!(
        public_id = %updated.public_id,
        from = %application.status,
        to = %status,
        "Application status updated"
    );

    // Best-effort notification; never fails the admin request.
    if let Some(notifier) = state.notifier.clone() {
        if let Ok(Some(internship)) = state.db.internships.get(updated.internship_id).await {
            let app_for_email = updated.clone();
            tokio::spawn(async move {
                notifier
                    .send_status_update(&app_for_email, &internship.title)
                    .await;
            });
        }
    }

    Ok(Json(ApplicationResponse::from(updated)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskAssignmentRequest {
    pub enabled: bool,
    pub details: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/applications/{application_id}/task",
    tag = "admin",
    request_body = UpdateTaskAssignmentRequest,
    params(
        ("application_id" = String, Path, description = "Public application id")
    ),
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 404, description = "Unknown application", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(
    skip(state, request),
    fields(application_id = %application_id, admin = %admin.key_name, operation = "update_task_assignment")
)]
pub async fn update_task_assignment(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(application_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateTaskAssignmentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let application = get_by_public_id(&state, &application_id).await?;

    let updated = state
        .db
        .applications
        .set_task_assignment(application.id, request.enabled, request.details.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok(Json(ApplicationResponse::from(updated)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub status: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/applications/{application_id}/payment",
    tag = "admin",
    request_body = UpdatePaymentRequest,
    params(
        ("application_id" = String, Path, description = "Public application id")
    ),
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 404, description = "Unknown application", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(
    skip(state, request),
    fields(application_id = %application_id, admin = %admin.key_name, operation = "update_payment")
)]
pub async fn update_payment(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(application_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let application = get_by_public_id(&state, &application_id).await?;

    // Payment is informational only; it never feeds the document gate.
    let updated = state
        .db
        .applications
        .set_payment(application.id, request.amount, request.status.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok(Json(ApplicationResponse::from(updated)))
}

#[derive(Debug, Deserialize)]
pub struct ListApplicationsQuery {
    pub internship_id: Option<Uuid>,
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/applications",
    tag = "admin",
    params(
        ("internship_id" = Option<Uuid>, Query, description = "Filter by internship"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "Applications", body = [ApplicationResponse])
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(skip(state, query), fields(admin = %admin.key_name, operation = "list_applications"))]
pub async fn list_applications(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let status = query
        .status
        .as_deref()
        .map(ApplicationStatus::from_str)
        .transpose()
        .map_err(|_| {
            AppError::InvalidInput(format!(
                "Unknown status filter '{}'",
                query.status.as_deref().unwrap_or_default()
            ))
        })?;

    let applications = state
        .db
        .applications
        .list(query.internship_id, status)
        .await?;

    let responses: Vec<ApplicationResponse> = applications
        .into_iter()
        .map(ApplicationResponse::from)
        .collect();

    Ok(Json(responses))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CorrectApplicantRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub college: String,
    pub degree: String,
    pub graduation_year: i32,
    pub resume_url: Option<String>,
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/applications/{application_id}/applicant",
    tag = "admin",
    request_body = CorrectApplicantRequest,
    params(
        ("application_id" = String, Path, description = "Public application id")
    ),
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 400, description = "Invalid applicant fields", body = ErrorResponse),
        (status = 404, description = "Unknown application", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(
    skip(state, request),
    fields(application_id = %application_id, admin = %admin.key_name, operation = "correct_applicant")
)]
pub async fn correct_applicant(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(application_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CorrectApplicantRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    validate_phone(&request.phone)
        .map_err(|e| AppError::InvalidInput(format!("Invalid phone: {}", e)))?;

    let application = get_by_public_id(&state, &application_id).await?;

    let updated = state
        .db
        .applications
        .update_applicant(
            application.id,
            &request.first_name,
            &request.last_name,
            &request.phone,
            &request.college,
            &request.degree,
            request.graduation_year,
            request.resume_url.as_deref(),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok(Json(ApplicationResponse::from(updated)))
}
