use std::sync::Arc;

use anyhow::Result;
use burnplan::{BurnAgent, BurnPlanConfig, web};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BurnPlanConfig::load()?;
    tracing::info!("Starting BurnPlan v{}", burnplan::VERSION);

    let agent = Arc::new(BurnAgent::new(&config)?);
    web::run(config.server.port, agent).await;
    Ok(())
}
