//! Database repositories for data access layer
//!
//! Each repository is responsible for a specific domain entity and provides
//! CRUD operations and specialized queries. Concurrency-sensitive updates
//! (duplicate prevention, download bookkeeping) are enforced here at the
//! statement level, not in application code.

pub mod admin_keys;
pub mod applications;
pub mod internships;

pub use admin_keys::{AdminKey, AdminKeyRepository};
pub use applications::ApplicationRepository;
pub use internships::InternshipRepository;
