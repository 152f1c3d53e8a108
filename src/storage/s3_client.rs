// S3 client backed by rust-s3

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::region::Region;
use s3::Bucket;
use tracing::debug;

use super::ObjectStore;
use crate::config::StorageConfig;
use crate::models::ObjectSummary;
use crate::types::StorageError;

const LIST_OPERATION: &str = "ListObjectsV2";
const PUT_OPERATION: &str = "PutObject";

pub struct S3Store {
    bucket: Bucket,
}

impl S3Store {
    /// Build a client for the configured bucket. No request is sent here.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config
                .region
                .parse::<Region>()
                .map_err(|e| StorageError::Unknown(format!("Invalid region {}: {}", config.region, e)))?,
        };

        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Unknown(e.to_string()))?;

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| StorageError::Unknown(e.to_string()))?;

        // S3-compatible servers (MinIO, LocalStack) expect path-style URLs.
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(Self { bucket })
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn bucket_name(&self) -> &str {
        &self.bucket.name
    }

    async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StorageError> {
        let pages = self
            .bucket
            .list(String::new(), None)
            .await
            .map_err(|e| classify(e, LIST_OPERATION))?;

        let mut files = Vec::new();
        for page in pages {
            for object in page.contents {
                files.push(ObjectSummary {
                    last_modified: parse_timestamp(&object.last_modified)?,
                    name: object.key,
                    size: object.size,
                });
            }
        }

        debug!(bucket = %self.bucket.name, count = files.len(), "Listed objects");
        Ok(files)
    }

    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| classify(e, PUT_OPERATION))?;

        debug!(bucket = %self.bucket.name, key, size = data.len(), "Stored object");
        Ok(())
    }

    async fn bucket_exists(&self) -> Result<bool, StorageError> {
        match self
            .bucket
            .list_page(String::new(), None, None, None, Some(1))
            .await
            .map_err(|e| classify(e, LIST_OPERATION))
        {
            Ok(_) => Ok(true),
            Err(StorageError::BucketNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::Unknown(format!("Invalid LastModified {:?}: {}", raw, e)))
}

fn classify(err: S3Error, operation: &str) -> StorageError {
    match err {
        S3Error::HttpFailWithBody(status, body) => from_error_response(operation, status, &body),
        other => StorageError::Unknown(other.to_string()),
    }
}

/// Map an S3 error response onto [`StorageError`] using its `<Code>` element,
/// falling back to the HTTP status when the body carries none.
pub(crate) fn from_error_response(operation: &str, status: u16, body: &str) -> StorageError {
    let code = xml_text(body, "Code").unwrap_or_else(|| status.to_string());
    let detail = xml_text(body, "Message").unwrap_or_else(|| "Unknown".to_string());
    let message = format!(
        "An error occurred ({}) when calling the {} operation: {}",
        code, operation, detail
    );

    match code.as_str() {
        "NoSuchBucket" => StorageError::BucketNotFound(message),
        "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "403" => {
            StorageError::AccessDenied(message)
        }
        _ => StorageError::Unknown(message),
    }
}

fn xml_text(body: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let len = body[start..].find(&close)?;
    let text = body[start..start + len].trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SUCH_BUCKET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message><BucketName>cloud-portfolio-demo</BucketName></Error>"#;

    #[test]
    fn test_no_such_bucket_is_bucket_not_found() {
        let err = from_error_response(LIST_OPERATION, 404, NO_SUCH_BUCKET);
        assert_eq!(
            err,
            StorageError::BucketNotFound(
                "An error occurred (NoSuchBucket) when calling the ListObjectsV2 operation: The specified bucket does not exist"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_http_failure_with_no_such_bucket_body() {
        let err = classify(
            S3Error::HttpFailWithBody(404, NO_SUCH_BUCKET.to_string()),
            LIST_OPERATION,
        );
        assert!(matches!(err, StorageError::BucketNotFound(_)));
    }

    #[test]
    fn test_access_denied() {
        let body = "<Error><Code>InvalidAccessKeyId</Code><Message>The AWS Access Key Id you provided does not exist in our records.</Message></Error>";
        assert!(matches!(
            from_error_response(PUT_OPERATION, 403, body),
            StorageError::AccessDenied(_)
        ));
        assert!(matches!(
            from_error_response(PUT_OPERATION, 403, ""),
            StorageError::AccessDenied(_)
        ));
    }

    #[test]
    fn test_other_errors_are_unknown() {
        let body = "<Error><Code>SlowDown</Code><Message>Reduce your request rate.</Message></Error>";
        let err = from_error_response(PUT_OPERATION, 503, body);
        assert_eq!(
            err.message(),
            "An error occurred (SlowDown) when calling the PutObject operation: Reduce your request rate."
        );
        assert!(matches!(err, StorageError::Unknown(_)));
    }

    #[test]
    fn test_bodyless_404_is_not_a_missing_bucket() {
        assert!(matches!(
            from_error_response(LIST_OPERATION, 404, ""),
            StorageError::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2009-10-12T17:50:30.000Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2009-10-12T17:50:30+00:00");
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_custom_endpoint_store() {
        let config = StorageConfig {
            provider: "s3".to_string(),
            bucket: "local-bucket".to_string(),
            region: "us-east-1".to_string(),
            access_key_id: "minio".to_string(),
            secret_access_key: "minio123".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
        };
        let store = S3Store::new(&config).unwrap();
        assert_eq!(store.bucket_name(), "local-bucket");
    }
}
