use crate::auth::api_key::{
    extract_key_prefix, generate_admin_key, hash_admin_key, AdminKeyResponse,
    CreateAdminKeyRequest, CreateAdminKeyResponse,
};
use crate::auth::AdminContext;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use kinetrexa_core::AppError;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/admin/keys",
    tag = "admin",
    request_body = CreateAdminKeyRequest,
    responses(
        (status = 201, description = "Key created; the raw key is only returned once", body = CreateAdminKeyResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(skip(state, request), fields(admin = %admin.key_name, operation = "create_admin_key"))]
pub async fn create_admin_key(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    ValidatedJson(request): ValidatedJson<CreateAdminKeyRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Key name must not be empty".to_string()).into());
    }

    let raw_key = generate_admin_key();
    let key_hash = hash_admin_key(&raw_key)?;
    let key_prefix = extract_key_prefix(&raw_key);

    let key = state
        .db
        .admin_keys
        .create(request.name.trim(), &key_hash, &key_prefix)
        .await?;

    tracing::info!(key_id = %key.id, name = %key.name, "Admin key created");

    Ok((
        StatusCode::CREATED,
        Json(CreateAdminKeyResponse {
            id: key.id,
            api_key: raw_key,
            name: key.name,
            key_prefix: key.key_prefix,
            created_at: key.created_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/keys",
    tag = "admin",
    responses(
        (status = 200, description = "Admin keys (hashes omitted)", body = [AdminKeyResponse])
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(skip(state), fields(admin = %admin.key_name, operation = "list_admin_keys"))]
pub async fn list_admin_keys(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
) -> Result<impl IntoResponse, HttpAppError> {
    let keys = state.db.admin_keys.list().await?;

    let responses: Vec<AdminKeyResponse> = keys.into_iter().map(AdminKeyResponse::from).collect();

    Ok(Json(responses))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/keys/{id}",
    tag = "admin",
    params(
        ("id" = Uuid, Path, description = "Admin key id")
    ),
    responses(
        (status = 204, description = "Key revoked"),
        (status = 404, description = "Unknown key", body = ErrorResponse)
    ),
    security(("admin_key" = []))
)]
#[tracing::instrument(skip(state), fields(key_id = %id, admin = %admin.key_name, operation = "revoke_admin_key"))]
pub async fn revoke_admin_key(
    State(state): State<Arc<AppState>>,
    admin: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let revoked = state.db.admin_keys.deactivate(id).await?;
    if !revoked {
        return Err(AppError::NotFound("Admin key not found".to_string()).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
