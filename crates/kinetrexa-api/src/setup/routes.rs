//! Route configuration and setup

use crate::auth::middleware::{admin_auth_middleware, AuthState};
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get, post, put},
    Json, Router,
};
use kinetrexa_core::Config;
use kinetrexa_infra::{request_id_middleware, security_headers_middleware};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let auth_state = Arc::new(AuthState {
        master_admin_key: config.admin_api_key().to_string(),
        admin_keys: state.db.admin_keys.clone(),
    });

    // Public routes (no authentication required)
    let public_routes = public_routes();

    // Admin routes (require a valid admin key on every call)
    let admin_routes = admin_routes().layer(axum::middleware::from_fn_with_state(
        auth_state,
        admin_auth_middleware,
    ));

    let api_routes = public_routes.merge(admin_routes);

    // Server-level concurrency limit to protect against resource exhaustion under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .nest(API_PREFIX, api_routes)
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_body_size_bytes()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    };
    Ok(cors)
}

/// Public routes (no authentication required)
fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/applications",
            post(handlers::applications::submit_application),
        )
        .route(
            "/applications/track/{email}",
            get(handlers::applications::track_applications),
        )
        .route("/applications/verify", post(handlers::verify::verify))
        .route(
            "/documents/{kind}/{application_id}",
            get(handlers::documents::download_document),
        )
        .route(
            "/internships",
            get(handlers::internships::list_internships),
        )
}

/// Admin routes, layered with the admin-key middleware
fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/admin/applications",
            get(handlers::admin::list_applications),
        )
        .route(
            "/admin/applications/{application_id}/status",
            put(handlers::admin::update_status),
        )
        .route(
            "/admin/applications/{application_id}/task",
            put(handlers::admin::update_task_assignment),
        )
        .route(
            "/admin/applications/{application_id}/payment",
            put(handlers::admin::update_payment),
        )
        .route(
            "/admin/applications/{application_id}/applicant",
            put(handlers::admin::correct_applicant),
        )
        .route(
            "/admin/documents/{kind}/{application_id}",
            post(handlers::documents::deposit_document),
        )
        .route(
            "/admin/internships",
            post(handlers::internships::create_internship),
        )
        .route(
            "/admin/internships/{id}",
            put(handlers::internships::update_internship),
        )
        .route(
            "/admin/keys",
            post(handlers::admin_keys::create_admin_key).get(handlers::admin_keys::list_admin_keys),
        )
        .route(
            "/admin/keys/{id}",
            delete(handlers::admin_keys::revoke_admin_key),
        )
}
