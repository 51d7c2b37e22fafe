//! OpenSASE Variant Engine - product variant resolution service

use anyhow::Result;
use opensase_variants::{api, EngineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // loads .env first so RUST_LOG from it reaches the filter below
    let config = EngineConfig::load()?;
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let app = api::build_router(api::AppState::new(config.display()));

    tracing::info!("OpenSASE variant engine listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
