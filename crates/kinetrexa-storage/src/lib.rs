//! KineTrexa Storage Library
//!
//! Storage abstraction for generated application documents (offer letters,
//! task assignments, certificates). The PDF-rendering collaborator deposits
//! bytes here; the API gates and streams them back out.
//!
//! # Storage key format
//!
//! Keys are application-scoped: `documents/{application_public_id}/{kind}.pdf`.
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use keys::document_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use kinetrexa_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
