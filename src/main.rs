use anyhow::{Context, Result};
use consistify_admin::{build_router, config::Config, services::Dataset, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting Consistify admin API v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {:?}", config.environment);

    let dataset = match &config.seed_path {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("loading seed data from {}", path.display()))?,
        None => {
            tracing::warn!("SEED_PATH not set, starting with an empty dataset");
            Dataset::default()
        }
    };

    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(AppState::new(config, dataset));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Dashboard websocket: ws://{}/dashboard/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl+c: {}", e);
        return;
    }
    tracing::info!("Shutting down gracefully...");
}
