// Cloud Container Portfolio - web front end for an S3 bucket

pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod storage;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;
