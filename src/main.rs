use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use film_recs_api::{catalog::Catalog, config::Config, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::from_csv(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_path))?;
    tracing::info!(films = catalog.len(), path = %config.catalog_path, "Catalog loaded");

    // The model build is CPU-bound and must finish before any request is served
    let stopwords = config.stopwords.clone();
    let state = tokio::task::spawn_blocking(move || AppState::build(catalog, stopwords))
        .await
        .context("Model build task failed")??;

    let app = create_router(Arc::new(state));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
