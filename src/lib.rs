pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod poller;
pub mod render;
pub mod routes;
pub mod thingspeak;

#[cfg(not(unix))]
use std::future;

use sqlx::SqlitePool;
use tokio::signal;

use crate::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub pool: SqlitePool,
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
