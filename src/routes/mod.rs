//! HTTP Routes
//!
//! - `/` - Landing page
//! - `/health`, `/ready` - Liveness and readiness probes
//! - `/files`, `/upload` - Bucket listing and upload
//! - `/info` - Application and storage configuration

pub mod files;
pub mod health;
pub mod info;
pub mod ui;

use axum::Router;
use tracing::info;

use crate::middleware::{apply_cors, apply_trace};
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let allowed_origins = state.config.server.cors_allowed_origins.clone();

    let router = Router::new()
        .merge(ui::router(state.clone()))
        .merge(health::router(state.clone()))
        .merge(files::router(state.clone()))
        .merge(info::router(state));

    apply_trace(apply_cors(router, &allowed_origins))
}
