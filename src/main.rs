use anyhow::Context;
use clap::Parser;
use stockroom::{ServerConfig, build_app};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    let _log_guard = config.log_config().init()?;

    let app = build_app(&config).await?;

    let addr = config.socket_addr().await?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running at {}", config.base_url());
    app.serve(listener).await?;

    info!("Server stopped");
    Ok(())
}
