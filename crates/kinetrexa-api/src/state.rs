//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only what
//! they need via Axum's `FromRef`.

use kinetrexa_core::Config;
use kinetrexa_db::{AdminKeyRepository, ApplicationRepository, InternshipRepository};
use kinetrexa_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::services::notifier::Notifier;

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub applications: ApplicationRepository,
    pub internships: InternshipRepository,
    pub admin_keys: AdminKeyRepository,
}

/// Generated-document storage.
#[derive(Clone)]
pub struct DocumentState {
    pub storage: Arc<dyn Storage>,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub documents: DocumentState,
    /// Best-effort applicant notifications; `None` when SMTP is not configured.
    pub notifier: Option<Notifier>,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for DocumentState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.documents.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
