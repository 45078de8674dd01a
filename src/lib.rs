pub mod error;
pub mod modules;
pub mod proxy; // Proxy service module

use anyhow::Context;
use tracing::{info, warn};

/// Load config, start the proxy and serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    let config = modules::config::load_proxy_config()
        .map_err(anyhow::Error::msg)
        .context("Failed to load proxy config")?;

    if config.api_key().is_none() {
        // Not fatal: requests answer with a configuration error until the key is set
        warn!(
            "{} is not set, prompt requests will be rejected",
            modules::config::ENV_API_KEY
        );
    }

    let state = proxy::AppState::from_config(&config).context("Failed to build upstream client")?;

    let (server, handle) = proxy::AxumServer::start(
        config.get_bind_address().to_string(),
        config.port,
        state,
    )
    .await
    .map_err(anyhow::Error::msg)?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    server.stop();
    handle.await.context("Server task failed")?;
    Ok(())
}
