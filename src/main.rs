use anyhow::Result;
use calmivox_backend::axum_http::http_serve;
use calmivox_backend::config::config_loader;
use calmivox_backend::infrastructure::memory::memory_store::MemoryStore;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Backend exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let store = MemoryStore::seeded();
    info!("In-memory store has been seeded");

    http_serve::start(Arc::new(dotenvy_env), Arc::new(store)).await?;

    Ok(())
}
