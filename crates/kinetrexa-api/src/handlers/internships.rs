use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kinetrexa_core::models::{CreateInternshipRequest, InternshipResponse};
use kinetrexa_core::AppError;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/v1/internships",
    tag = "internships",
    responses(
        (status = 200, description = "Active internships", body = [InternshipResponse])
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_internships"))]
pub async fn list_internships(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let internships = state.db.internships.list_active().await?;

    let responses: Vec<InternshipResponse> = internships
        .into_iter()
        .map(InternshipResponse::from)
        .collect();

    Ok(Json(responses))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/internships",
    tag = "admin",
    request_body = CreateInternshipRequest,
    responses(
        (status = 201, description = "Internship created", body = InternshipResponse),
        (status = 400, description = "Invalid fields", body = ErrorResponse),
        (status = 409, description = "Title already exists", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(skip(state, request), fields(admin = %admin.key_name, operation = "create_internship"))]
pub async fn create_internship(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateInternshipRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    request.check_dates()?;

    let internship = state.db.internships.create(&request).await?;

    tracing::info!(internship_id = %internship.id, title = %internship.title, "Internship created");

    Ok((
        StatusCode::CREATED,
        Json(InternshipResponse::from(internship)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/internships/{id}",
    tag = "admin",
    request_body = CreateInternshipRequest,
    params(
        ("id" = Uuid, Path, description = "Internship id")
    ),
    responses(
        (status = 200, description = "Internship updated", body = InternshipResponse),
        (status = 404, description = "Unknown internship", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(skip(state, request), fields(internship_id = %id, admin = %admin.key_name, operation = "update_internship"))]
pub async fn update_internship(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateInternshipRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;
    request.check_dates()?;

    let internship = state
        .db
        .internships
        .update(id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound("Internship not found".to_string()))?;

    Ok(Json(InternshipResponse::from(internship)))
}
