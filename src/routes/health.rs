//! Liveness and readiness probes
//!
//! `/health` answers as long as the process is serving requests. `/ready`
//! additionally requires the storage handle, so an orchestrator stops routing
//! traffic to an instance that could not reach its bucket configuration.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::models::{AppState, HealthResponse, NotReadyResponse, SERVICE_NAME};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

async fn readiness_check(State(state): State<AppState>) -> Response {
    if !state.storage_available() {
        let body = NotReadyResponse {
            status: "not ready",
            reason: "S3 client not initialized",
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    }

    let body = HealthResponse {
        status: "ready",
        service: SERVICE_NAME,
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::{MemoryStore, ObjectStore};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(storage: Option<Arc<dyn ObjectStore>>) -> AppState {
        AppState::new(Config::from_lookup(|_| None).unwrap(), storage)
    }

    async fn call(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_ready_without_storage() {
        let (status, body) = call(state(None), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["reason"], "S3 client not initialized");
    }

    #[tokio::test]
    async fn test_ready_with_storage() {
        let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::new("demo"));
        let (status, body) = call(state(Some(store)), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "ready", "service": SERVICE_NAME }));
    }

    #[tokio::test]
    async fn test_health_without_storage() {
        let (status, body) = call(state(None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
