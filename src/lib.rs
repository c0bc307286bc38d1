pub mod api;
pub mod backend;
pub mod config;
pub mod core_state;
pub mod export;
pub mod models;
pub mod risk;
pub mod session_state;
pub mod tips;
pub mod workflow;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::backend::BackendError;
use crate::config::{AppConfig, ConfigError};
use crate::core_state::CoreState;

/// Errors that stop the tool before it can serve anything.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("prediction backend setup failed: {0}")]
    Backend(#[from] BackendError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;

    // The blocking HTTP client owns its own runtime; build and drop it
    // outside of ours.
    let core = Arc::new(CoreState::from_config(&config)?);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(serve_until_interrupted(core.clone(), &config));
    drop(runtime);
    drop(core);

    result
}

async fn serve_until_interrupted(
    core: Arc<CoreState>,
    config: &AppConfig,
) -> Result<(), StartupError> {
    let mut server = api::start_session_server(core, config.bind_addr).await?;
    tracing::info!(
        session_id = %server.session.session_id,
        "Open http://{}/api/form to begin",
        server.session.server_addr
    );

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }

    server.shutdown();
    server.stopped().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
