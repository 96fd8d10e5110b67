use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{normalize_addr, AppConfig};
use crate::database::{DatabaseManager, Repository};
use crate::routes::{api_router, create_app};
use crate::state::AppState;

/// Run the main listener, plus the API-only listener when configured, until
/// Ctrl-C or SIGTERM.
pub async fn handle(
    mut config: AppConfig,
    addr: Option<String>,
    api_addr: Option<String>,
) -> anyhow::Result<()> {
    if let Some(addr) = addr {
        config.server.addr = normalize_addr(&addr);
    }
    if let Some(api_addr) = api_addr {
        config.server.api_addr = Some(normalize_addr(&api_addr));
    }

    info!("Starting Vitals in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    let store = Arc::new(Repository::new(pool.clone(), config.dashboard.user_id));
    let state = AppState::new(store, config.clone());

    let listener = TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.addr))?;
    info!("Vitals listening on http://{}", config.server.addr);
    let main = axum::serve(listener, create_app(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    match &config.server.api_addr {
        Some(api_addr) => {
            let api_listener = TcpListener::bind(api_addr)
                .await
                .with_context(|| format!("failed to bind {}", api_addr))?;
            info!("Vitals API listening on http://{}", api_addr);
            let api = axum::serve(api_listener, api_router(state))
                .with_graceful_shutdown(shutdown_signal())
                .into_future();
            tokio::try_join!(main, api).context("server error")?;
        }
        None => main.await.context("server error")?,
    }

    DatabaseManager::close(pool).await;
    info!("Vitals stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
