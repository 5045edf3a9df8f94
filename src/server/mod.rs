pub mod handlers;
pub mod pages;
pub mod routes;

use tokio::sync::broadcast;
use tracing::info;

use crate::config::Config;
use crate::error::{PortfolioError, Result};

pub async fn serve(config: Config, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
    let bind = config.bind.clone();
    let app = routes::build(config);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| PortfolioError::Config(format!("failed to bind {bind}: {e}")))?;

    info!(bind = %bind, "portfolio server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await
        .map_err(|e| PortfolioError::Config(format!("server error: {e}")))?;

    Ok(())
}
