//! Web server command

use std::net::IpAddr;

use tracing::{info, warn};

use super::{build_narrator, build_report_service};
use crate::config::AppConfig;
use crate::storage::RoundupDatabase;
use crate::web::{build_router, AppState};
use crate::Result;

pub async fn handle_serve(
    mut config: AppConfig,
    port: Option<u16>,
    bind: Option<IpAddr>,
) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(bind) = bind {
        config.server.bind = bind;
    }

    let db = match RoundupDatabase::new(&config.storage.db_path) {
        Ok(db) => db,
        Err(e) => {
            warn!(error = %e, path = %config.storage.db_path.display(), "narrative database unavailable, using memory");
            RoundupDatabase::in_memory()?
        }
    };

    let state = AppState::new(build_report_service(&config)?, build_narrator(&config), db)?;
    let app = build_router(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, league_id = %config.espn.league_id, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
