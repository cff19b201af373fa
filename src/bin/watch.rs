use std::path::PathBuf;

use clap::Parser;
use occupancy_backend::config;
use occupancy_backend::{logging, poller};

#[derive(Debug, Parser)]
#[command(version, about = "Terminal dashboard that polls the occupancy API")]
struct Arguments {
    /// Path to the configuration file
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Arguments::parse();

    let config = config::load_config(&args.config).await?;
    poller::run(config.poller).await
}
