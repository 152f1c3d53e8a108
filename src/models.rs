use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::storage::ObjectStore;

pub const SERVICE_NAME: &str = "cloud-portfolio-app";
pub const APPLICATION_NAME: &str = "Cloud Container Portfolio";
pub const APPLICATION_VERSION: &str = "1.0.0";

/// Shared handler state.
///
/// `storage` is `None` when the storage client could not be constructed at
/// startup. It is never replaced afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Option<Arc<dyn ObjectStore>>,
}

impl AppState {
    pub fn new(config: Config, storage: Option<Arc<dyn ObjectStore>>) -> Self {
        Self { config, storage }
    }

    pub fn storage_available(&self) -> bool {
        self.storage.is_some()
    }

    pub fn bucket_name(&self) -> &str {
        &self.config.storage.bucket
    }
}

/// One stored object as reported by a bucket listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectSummary {
    pub name: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

// API response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NotReadyResponse {
    pub status: &'static str,
    pub reason: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub files: Vec<ObjectSummary>,
}

impl FileListResponse {
    pub fn files(files: Vec<ObjectSummary>) -> Self {
        Self { error: None, message: None, files }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), message: None, files: Vec::new() }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub application: &'static str,
    pub version: &'static str,
    pub aws_region: String,
    pub bucket_name: String,
    pub s3_configured: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_object_summary_serializes_iso_timestamp() {
        let summary = ObjectSummary {
            name: "report.pdf".to_string(),
            size: 2048,
            last_modified: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "report.pdf");
        assert_eq!(json["size"], 2048);
        assert_eq!(json["last_modified"], "2024-03-01T12:30:00Z");
    }

    #[test]
    fn test_plain_listing_omits_error_fields() {
        let json = serde_json::to_value(FileListResponse::files(vec![])).unwrap();
        assert_eq!(json, serde_json::json!({ "files": [] }));
    }
}
