//! Bucket listing and upload endpoints
//!
//! - `GET /files` - list every object in the configured bucket
//! - `POST /upload` - store the multipart field `file` under its filename

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use tracing::{error, info, warn};

use crate::models::{AppState, FileListResponse, UploadResponse};
use crate::storage::content_type_for;
use crate::types::{AppError, AppResult, StorageError};

pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/files", get(list_files))
        .route(
            "/upload",
            post(upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

async fn list_files(State(state): State<AppState>) -> Response {
    let Some(store) = state.storage.as_ref() else {
        let body = FileListResponse::error(AppError::StorageUnavailable.to_string());
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    };

    match store.list_objects().await {
        Ok(files) => (StatusCode::OK, Json(FileListResponse::files(files))).into_response(),
        // A missing bucket is expected when the demo runs without real
        // credentials, so it is reported with 200.
        Err(StorageError::BucketNotFound(raw)) => {
            warn!(bucket = %state.bucket_name(), "Listing failed, bucket missing: {}", raw);
            let body = FileListResponse {
                error: Some(format!("Bucket {} does not exist", state.bucket_name())),
                message: Some(
                    "This is a demo application. Configure AWS credentials to use real S3."
                        .to_string(),
                ),
                files: Vec::new(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(bucket = %state.bucket_name(), "Failed to list objects: {}", e);
            let body = FileListResponse::error(e.message());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

struct FilePart {
    filename: String,
    content_type: String,
    data: Bytes,
}

async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let store = state.storage.as_ref().ok_or(AppError::StorageUnavailable)?;

    // A body that is not multipart at all carries no file part.
    let Ok(mut multipart) = multipart else {
        return Err(AppError::NoFileProvided);
    };

    let part = read_file_part(&mut multipart)
        .await?
        .ok_or(AppError::NoFileProvided)?;

    if part.filename.is_empty() {
        return Err(AppError::NoFileSelected);
    }

    info!(
        filename = %part.filename,
        size = part.data.len(),
        content_type = %part.content_type,
        "Uploading file"
    );

    store
        .put_object(&part.filename, part.data, &part.content_type)
        .await
        .map_err(|e| {
            error!(filename = %part.filename, "Upload failed: {}", e);
            e
        })?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully",
        filename: part.filename,
    }))
}

/// Find the first field named `file` that carries a filename attribute.
/// Plain form fields named `file` do not count as file parts.
async fn read_file_part(multipart: &mut Multipart) -> AppResult<Option<FilePart>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = content_type_for(&filename, field.content_type());
        let data = field.bytes().await?;

        return Ok(Some(FilePart {
            filename,
            content_type,
            data,
        }));
    }

    Ok(None)
}
