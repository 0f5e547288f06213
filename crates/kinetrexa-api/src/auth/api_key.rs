//! Admin key types and helpers (create/list/verify admin keys).

use chrono::{DateTime, Utc};
use kinetrexa_db::AdminKey;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request to create a new admin key
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAdminKeyRequest {
    /// Human-readable name for the key
    #[schema(example = "Admin panel")]
    pub name: String,
}

/// Response when creating an admin key (includes the raw key - only shown once)
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateAdminKeyResponse {
    pub id: Uuid,

    /// The full admin key - save this securely, it won't be shown again
    #[schema(example = "ka_live_abc123def456ghi789jkl012mno345pqr678")]
    pub api_key: String,

    pub name: String,

    /// Key prefix for identification
    #[schema(example = "ka_live_abc123de")]
    pub key_prefix: String,

    pub created_at: DateTime<Utc>,
}

/// Admin key information (without the secret key)
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminKeyResponse {
    pub id: Uuid,
    pub name: String,
    pub key_prefix: String,
    pub last_used_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AdminKey> for AdminKeyResponse {
    fn from(key: AdminKey) -> Self {
        Self {
            id: key.id,
            name: key.name,
            key_prefix: key.key_prefix,
            last_used_at: key.last_used_at,
            is_active: key.is_active,
            created_at: key.created_at,
        }
    }
}

/// Generate a secure admin key
pub fn generate_admin_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..20).map(|_| rng.random()).collect();
    let random_part = hex::encode(random_bytes);

    // Format: ka_live_<40 hex chars>
    format!("ka_live_{}", random_part)
}

/// Hash an admin key for storage
pub fn hash_admin_key(key: &str) -> Result<String, kinetrexa_core::AppError> {
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Argon2,
    };

    use rand_core::OsRng;
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(key.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| kinetrexa_core::AppError::Internal(format!("Failed to hash admin key: {}", e)))
}

/// Verify an admin key against a hash.
pub fn verify_admin_key(key: &str, hash: &str) -> Result<bool, kinetrexa_core::AppError> {
    use argon2::{
        password_hash::{PasswordHash, PasswordVerifier},
        Argon2,
    };

    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| kinetrexa_core::AppError::Internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(key.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Extract the key prefix (first 16 chars) for identification.
pub fn extract_key_prefix(key: &str) -> String {
    if key.len() > 16 {
        key[..16].to_string()
    } else {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_admin_key() {
        let key = generate_admin_key();
        assert!(key.starts_with("ka_live_"));
        assert_eq!(key.len(), 48); // "ka_live_" (8) + 40 hex chars
    }

    #[test]
    fn test_hash_and_verify_admin_key() {
        let key = generate_admin_key();
        let hash = hash_admin_key(&key).unwrap();

        assert!(verify_admin_key(&key, &hash).unwrap());
        assert!(!verify_admin_key("wrong_key", &hash).unwrap());
    }

    #[test]
    fn test_extract_key_prefix() {
        let key = "ka_live_abc123def456";
        let prefix = extract_key_prefix(key);
        assert_eq!(prefix, "ka_live_abc123de");
        assert_eq!(prefix.len(), 16);
    }
}
