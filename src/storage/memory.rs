// In-process object store for local runs and tests

use std::collections::BTreeMap;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::ObjectStore;
use crate::models::ObjectSummary;
use crate::types::StorageError;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

/// Keys are kept sorted, matching the lexicographic order of S3 listings.
pub struct MemoryStore {
    bucket: String,
    bucket_exists: bool,
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            bucket_exists: true,
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// A store whose bucket was never created; every request fails with
    /// [`StorageError::BucketNotFound`].
    pub fn missing_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket_exists: false,
            ..Self::new(bucket)
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_bucket(&self, operation: &str) -> Result<(), StorageError> {
        if self.bucket_exists {
            Ok(())
        } else {
            Err(StorageError::BucketNotFound(format!(
                "An error occurred (NoSuchBucket) when calling the {} operation: The specified bucket does not exist",
                operation
            )))
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket_name(&self) -> &str {
        &self.bucket
    }

    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StorageError> {
        self.check_bucket("ListObjectsV2")?;

        let objects = self.objects.read().await;
        Ok(objects
            .iter()
            .map(|(key, object)| ObjectSummary {
                name: key.clone(),
                size: object.data.len() as u64,
                last_modified: object.last_modified,
            })
            .collect())
    }

    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.check_bucket("PutObject")?;

        let object = StoredObject {
            data,
            content_type: content_type.to_string(),
            last_modified: Utc::now(),
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }

    async fn bucket_exists(&self) -> Result<bool, StorageError> {
        Ok(self.bucket_exists)
    }
}
