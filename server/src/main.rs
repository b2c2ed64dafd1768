use std::sync::Arc;

use anyhow::Context;
use todo_core::{pool, DbConfig, PgTodoStore};
use todo_server::{config::DEFAULT_LOG_FILTER, docs::DOCS_PATH, ServerConfig};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_config = DbConfig::from_env().context("reading database configuration")?;
    let server_config = ServerConfig::from_env().context("reading server configuration")?;

    let pool = pool::connect_lazy(&db_config);
    pool::migrate(&pool)
        .await
        .with_context(|| format!("preparing schema on {}", db_config.host))?;
    let store = Arc::new(PgTodoStore::new(pool.clone()));

    let addr = server_config.addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server is running on http://{addr}");
    info!("API docs available at http://{addr}{DOCS_PATH}");

    todo_server::run(listener, store, shutdown_signal()).await?;

    pool.close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
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
