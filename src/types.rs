// Error types shared by the storage layer and the HTTP handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failure reported by the object-storage collaborator.
///
/// Every variant carries the raw message from the storage service so it can be
/// passed through to the client unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("{0}")]
    BucketNotFound(String),

    #[error("{0}")]
    AccessDenied(String),

    #[error("{0}")]
    Unknown(String),
}

impl StorageError {
    pub fn message(&self) -> &str {
        match self {
            StorageError::BucketNotFound(msg)
            | StorageError::AccessDenied(msg)
            | StorageError::Unknown(msg) => msg,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("S3 client not available")]
    StorageUnavailable,

    #[error("No file provided")]
    NoFileProvided,

    #[error("No file selected")]
    NoFileSelected,

    #[error("{message}")]
    InvalidUpload { status: StatusCode, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoFileProvided | AppError::NoFileSelected => StatusCode::BAD_REQUEST,
            AppError::InvalidUpload { status, .. } => *status,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::InvalidUpload {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NoFileProvided.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NoFileSelected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::StorageUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(StorageError::AccessDenied("denied".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_message_passes_through() {
        let err = AppError::from(StorageError::Unknown("raw failure".into()));
        assert_eq!(err.to_string(), "raw failure");
    }
}
