//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::services::notifier::Notifier;
use crate::state::{AppState, DbState, DocumentState};
use anyhow::{Context, Result};
use kinetrexa_core::Config;
use kinetrexa_db::{AdminKeyRepository, ApplicationRepository, InternshipRepository};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup document storage
    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState {
        db: DbState {
            pool: pool.clone(),
            applications: ApplicationRepository::new(pool.clone()),
            internships: InternshipRepository::new(pool.clone()),
            admin_keys: AdminKeyRepository::new(pool),
        },
        documents: DocumentState { storage },
        notifier: Notifier::from_config(&config),
        is_production: config.is_production(),
        config: config.clone(),
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
