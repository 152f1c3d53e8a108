use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use cloud_portfolio_app::{config::Config, server, storage, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloud_portfolio_app=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    // A failed client leaves the service up but not ready
    let storage = storage::init_storage(&config.storage);
    if let Some(store) = &storage {
        storage::probe_bucket(store.as_ref()).await;
    }

    let state = AppState::new(config, storage);
    server::run(state).await
}
