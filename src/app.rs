// Startup wiring: cache directory, docs, state, router

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;
use anyhow::Context;
use std::sync::Arc;
use stockroom_core::Application;
use stockroom_openapi::{SwaggerConfig, load_spec};
use stockroom_storage::LocalStorage;
use tracing::info;

/// Path the Swagger UI is mounted at
pub const DOCS_PATH: &str = "/docs";

/// Prepare everything a request needs.
///
/// Creates the cache directory and loads the OpenAPI document. Either
/// failing aborts startup.
pub async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let storage = LocalStorage::new(&config.cache)
        .await
        .with_context(|| format!("Cannot use cache directory {}", config.cache.display()))?;

    let spec = load_spec(&config.docs)
        .await
        .context("Cannot load API documentation")?
        .with_default_server(config.base_url());
    info!(path = %config.docs.display(), "Loaded API documentation");

    Ok(AppState::new(
        Arc::new(storage),
        config.public.clone(),
        SwaggerConfig::new(DOCS_PATH, spec),
    ))
}

/// Build the server from configuration
pub async fn build_app(config: &ServerConfig) -> anyhow::Result<Application> {
    let state = build_state(config).await?;
    let router = build_router(state)?;
    Ok(Application::new(router))
}
