use std::env;

use anyhow::{Context, Result};
use yatra_api::{build_app, ApiConfig};
use yatra_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("yatra_api");

    let config = ApiConfig::from_env();
    let bind = env::var("YATRA_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let data_dir = config.store.data_dir.display().to_string();

    let app = build_app(config)?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, data_dir = %data_dir, "yatra travel api started");

    axum::serve(listener, app).await?;
    Ok(())
}
