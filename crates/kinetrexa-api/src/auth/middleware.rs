use crate::auth::api_key::{extract_key_prefix, verify_admin_key};
use crate::error::HttpAppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use kinetrexa_core::AppError;
use kinetrexa_db::AdminKeyRepository;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use uuid::Uuid;

const ADMIN_KEY_PREFIX: &str = "ka_live_";

/// State for the admin auth middleware: the bootstrap key from config plus
/// the repository of DB-managed keys.
#[derive(Clone)]
pub struct AuthState {
    pub master_admin_key: String,
    pub admin_keys: AdminKeyRepository,
}

/// Identity of the authenticated administrator, inserted into request
/// extensions. `key_id` is `None` for the bootstrap key.
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub key_id: Option<Uuid>,
    pub key_name: String,
}

impl<S> FromRequestParts<S> for AdminContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminContext>()
            .cloned()
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Admin authentication required".to_string(),
                ))
            })
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn unauthorized(msg: &str) -> Response {
    HttpAppError(AppError::Unauthorized(msg.to_string())).into_response()
}

/// Admin authentication middleware.
///
/// Accepts `Authorization: Bearer <key>` where the key is either the
/// bootstrap `ADMIN_API_KEY` (constant-time compare) or an active DB-managed
/// key (prefix lookup + argon2 verify).
pub async fn admin_auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => return unauthorized("Missing authorization header"),
    };

    let Some(token) = auth_header.strip_prefix("Bearer ") else {
        return unauthorized("Invalid authorization header format");
    };

    if secure_compare(token, &auth_state.master_admin_key) {
        request.extensions_mut().insert(AdminContext {
            key_id: None,
            key_name: "bootstrap".to_string(),
        });
        return next.run(request).await;
    }

    if !token.starts_with(ADMIN_KEY_PREFIX) {
        return unauthorized("Invalid admin key");
    }

    let prefix = extract_key_prefix(token);
    let candidates = match auth_state.admin_keys.find_active_by_prefix(&prefix).await {
        Ok(keys) => keys,
        Err(err) => return HttpAppError(err).into_response(),
    };

    for key in candidates {
        match verify_admin_key(token, &key.key_hash) {
            Ok(true) => {
                if let Err(err) = auth_state.admin_keys.touch_last_used(key.id).await {
                    tracing::warn!(error = %err, key_id = %key.id, "Failed to update key last_used_at");
                }
                request.extensions_mut().insert(AdminContext {
                    key_id: Some(key.id),
                    key_name: key.name,
                });
                return next.run(request).await;
            }
            Ok(false) => continue,
            Err(err) => return HttpAppError(err).into_response(),
        }
    }

    unauthorized("Invalid admin key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_compare() {
        assert!(secure_compare("ka_live_abc", "ka_live_abc"));
        assert!(!secure_compare("ka_live_abc", "ka_live_abd"));
        assert!(!secure_compare("short", "a-much-longer-string"));
    }
}
