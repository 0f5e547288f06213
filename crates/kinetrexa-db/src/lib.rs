//! KineTrexa database layer.
//!
//! Repositories for the application lifecycle: applications, internships,
//! and admin keys. All queries are dynamic SQLx queries (no `DATABASE_URL`
//! needed at build time).

pub mod db;

pub use db::{AdminKey, AdminKeyRepository, ApplicationRepository, InternshipRepository};
