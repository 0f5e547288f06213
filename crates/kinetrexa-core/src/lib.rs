//! KineTrexa Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! validation shared across all KineTrexa service components.

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
