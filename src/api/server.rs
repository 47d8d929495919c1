//! HTTP server with graceful shutdown.

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::utils::shutdown_signal;

use super::handlers::AppState;
use super::routes::create_router;

/// Bind `config.host:config.port` and serve until SIGINT/SIGTERM.
///
/// Returns after in-flight requests have drained.
pub async fn serve(config: &Config) -> Result<()> {
    config.validate().map_err(ProxyError::InvalidConfig)?;
    let addr = config.bind_addr().map_err(ProxyError::InvalidConfig)?;

    if config.token().is_none() {
        warn!("GITHUB_TOKEN is not set; contribution endpoints will return 500");
    }

    let router = create_router(AppState::from_config(config)?);
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %addr,
        login = %config.github_username,
        upstream = %config.github_graphql_url,
        "HTTP server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
