//! Object storage layer
//!
//! Handlers talk to the bucket only through [`ObjectStore`], so the S3 client
//! can be swapped for the in-memory store in local runs and tests.

pub mod memory;
pub mod s3_client;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{error, info, warn};

use crate::config::StorageConfig;
use crate::models::ObjectSummary;
use crate::types::StorageError;

pub use memory::MemoryStore;
pub use s3_client::S3Store;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket this store reads and writes.
    fn bucket_name(&self) -> &str;

    /// List every object in the bucket, in the order the service returns them.
    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StorageError>;

    /// Store `data` under `key`, replacing any existing object.
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    async fn bucket_exists(&self) -> Result<bool, StorageError>;
}

/// Build the storage handle for the configured provider.
pub fn connect(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>, StorageError> {
    match config.provider.as_str() {
        "s3" => Ok(Arc::new(S3Store::new(config)?)),
        "memory" => Ok(Arc::new(MemoryStore::new(config.bucket.clone()))),
        other => Err(StorageError::Unknown(format!(
            "Unsupported storage provider: {}",
            other
        ))),
    }
}

/// Build the storage handle, logging the outcome. A failure leaves the
/// service running with no handle.
pub fn init_storage(config: &StorageConfig) -> Option<Arc<dyn ObjectStore>> {
    match connect(config) {
        Ok(store) => {
            info!(
                provider = %config.provider,
                bucket = %config.bucket,
                "S3 client initialized for bucket: {}",
                config.bucket
            );
            Some(store)
        }
        Err(e) => {
            error!("Error initializing S3 client: {}", e);
            None
        }
    }
}

/// One-shot startup diagnostic. Never affects readiness.
pub async fn probe_bucket(store: &dyn ObjectStore) {
    match store.bucket_exists().await {
        Ok(true) => info!(bucket = %store.bucket_name(), "Bucket is reachable"),
        Ok(false) => warn!(bucket = %store.bucket_name(), "Bucket does not exist"),
        Err(e) => warn!(bucket = %store.bucket_name(), "Bucket probe failed: {}", e),
    }
}

/// Content type for an upload: the client's declared type, else a guess from
/// the filename.
pub fn content_type_for(filename: &str, declared: Option<&str>) -> String {
    match declared {
        Some(ct) if !ct.is_empty() => ct.to_string(),
        _ => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .essence_str()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_config(provider: &str) -> StorageConfig {
        StorageConfig {
            provider: provider.to_string(),
            bucket: "cloud-portfolio-demo".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: "mock-access-key".to_string(),
            secret_access_key: "mock-secret-key".to_string(),
            endpoint: None,
        }
    }

    #[test]
    fn test_connect_memory_provider() {
        let store = connect(&storage_config("memory")).unwrap();
        assert_eq!(store.bucket_name(), "cloud-portfolio-demo");
    }

    #[test]
    fn test_connect_s3_provider_without_network() {
        let store = connect(&storage_config("s3")).unwrap();
        assert_eq!(store.bucket_name(), "cloud-portfolio-demo");
    }

    #[test]
    fn test_unknown_provider_leaves_handle_unavailable() {
        assert!(init_storage(&storage_config("ftp")).is_none());
    }

    #[test]
    fn test_content_type_selection() {
        assert_eq!(content_type_for("a.png", Some("image/webp")), "image/webp");
        assert_eq!(content_type_for("a.png", None), "image/png");
        assert_eq!(content_type_for("a.png", Some("")), "image/png");
        assert_eq!(content_type_for("noext", None), "application/octet-stream");
    }
}
