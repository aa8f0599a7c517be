//! Server: loads settings, prepares the database, serves the router.

use entity_store::{app, connect, ensure_database_exists, ensure_schema, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("entity_store=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings).await?;
    ensure_schema(&pool, settings.database_schema.as_deref()).await?;

    let router = app(AppState::new(pool), settings.body_limit_bytes);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
