use std::path::PathBuf;

use clap::Parser;
use occupancy_backend::config::{self, Config};
use occupancy_backend::{db, logging, routes, shutdown_signal, AppContext};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(version, about = "Bus occupancy dashboard API")]
struct Arguments {
    /// Path to the configuration file
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
}

async fn start_api(config: Config, pool: SqlitePool) -> anyhow::Result<()> {
    let bind = config.api.bind.clone();
    let router = routes::router(AppContext { config, pool });

    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("api is running on http://{bind}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Arguments::parse();

    let config = config::load_config(&args.config).await?;
    let pool = db::connect(&config.database).await?;

    start_api(config, pool).await
}
