use axum::{extract::State, routing::get, Json, Router};

use crate::models::{AppState, InfoResponse, APPLICATION_NAME, APPLICATION_VERSION};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/info", get(app_info))
        .with_state(state)
}

async fn app_info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        application: APPLICATION_NAME,
        version: APPLICATION_VERSION,
        aws_region: state.config.storage.region.clone(),
        bucket_name: state.bucket_name().to_string(),
        s3_configured: state.storage_available(),
    })
}
