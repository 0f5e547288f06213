//! Document storage setup

use anyhow::{anyhow, Result};
use kinetrexa_core::{Config, StorageBackend};
use kinetrexa_storage::{LocalStorage, S3Storage, Storage};
use std::sync::Arc;

/// Build the storage backend for generated documents from config.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    match config.storage_backend() {
        StorageBackend::Local => {
            let path = config
                .local_storage_path()
                .ok_or_else(|| anyhow!("LOCAL_STORAGE_PATH must be set for local storage"))?;
            let storage = LocalStorage::new(path)
                .await
                .map_err(|e| anyhow!("Failed to initialize local storage: {}", e))?;

            tracing::info!(path = %path, "Document storage: local filesystem");
            Ok(Arc::new(storage))
        }
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .ok_or_else(|| anyhow!("S3_BUCKET must be set for S3 storage"))?;
            let region = config
                .s3_region()
                .ok_or_else(|| anyhow!("S3_REGION must be set for S3 storage"))?;
            let storage = S3Storage::new(
                bucket.to_string(),
                region.to_string(),
                config.s3_endpoint().map(String::from),
            )
            .await
            .map_err(|e| anyhow!("Failed to initialize S3 storage: {}", e))?;

            tracing::info!(bucket = %bucket, region = %region, "Document storage: S3");
            Ok(Arc::new(storage))
        }
    }
}
