//! Web server proxying the VIA/VAS portal.
//!
//! Exposes the search, procedure, document-list, and download endpoints as a
//! JSON API. The server holds no state beyond the portal client; every
//! response is rebuilt from portal HTML on demand.

mod handlers;
mod routes;

pub use routes::create_router;

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::portal::PortalClient;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<PortalClient>,
    pub cors_origins: Vec<String>,
}

impl AppState {
    pub fn new(settings: &Settings) -> crate::error::Result<Self> {
        Ok(Self {
            portal: Arc::new(PortalClient::new(settings.portal.clone())?),
            cors_origins: settings.server.cors_origins.clone(),
        })
    }
}

/// Start the web server and run until shutdown.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::new(settings)?;
    let app = create_router(state);

    info!("Starting server at http://{}", settings.server.bind);

    let listener = tokio::net::TcpListener::bind(settings.server.bind.as_str()).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
