use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use timetable::config::AppConfig;
use timetable::db::Store;
use timetable::server::create_router;
use timetable::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger to use environment variables.
    //
    // `RUST_LOG=debug` also shows which entry blocked a rejected lesson.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open database at {}", config.db_path))?;
    let app_state = Arc::new(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!(
        "Timetable server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
