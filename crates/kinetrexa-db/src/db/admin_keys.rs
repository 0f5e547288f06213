use chrono::{DateTime, Utc};
use kinetrexa_core::AppError;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Admin key stored in database. The raw key is never stored, only an
/// argon2 hash plus a prefix for identification.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdminKey {
    pub id: Uuid,
    pub name: String,
    pub key_hash: String,
    pub key_prefix: String,
    pub last_used_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for admin API keys.
#[derive(Clone)]
pub struct AdminKeyRepository {
    pool: PgPool,
}

impl AdminKeyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        key_hash: &str,
        key_prefix: &str,
    ) -> Result<AdminKey, AppError> {
        let key = sqlx::query_as::<_, AdminKey>(
            r#"
            INSERT INTO admin_keys (id, name, key_hash, key_prefix, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(key_hash)
        .bind(key_prefix)
        .fetch_one(&self.pool)
        .await?;

        Ok(key)
    }

    pub async fn list(&self) -> Result<Vec<AdminKey>, AppError> {
        let keys =
            sqlx::query_as::<_, AdminKey>("SELECT * FROM admin_keys ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(keys)
    }

    /// Active keys matching a prefix. The prefix narrows the candidate set so
    /// the caller only argon2-verifies a handful of hashes.
    pub async fn find_active_by_prefix(&self, key_prefix: &str) -> Result<Vec<AdminKey>, AppError> {
        let keys = sqlx::query_as::<_, AdminKey>(
            "SELECT * FROM admin_keys WHERE key_prefix = $1 AND is_active = TRUE",
        )
        .bind(key_prefix)
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    pub async fn touch_last_used(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE admin_keys SET last_used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Deactivate (revoke) a key. Returns `false` if the key does not exist.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE admin_keys SET is_active = FALSE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
