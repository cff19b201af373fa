// Feeds the API with a random walk of passenger counts, handy for demoing
// the dashboard without real hardware on the bus.

use std::path::PathBuf;

use clap::Parser;
use occupancy_backend::config::{self, SimulatorConfig};
use occupancy_backend::logging;
use serde_json::json;
use tokio::time;

#[derive(Debug, Parser)]
#[command(version, about = "Post simulated occupancy readings to the API")]
struct Arguments {
    /// Path to the configuration file
    #[arg(long, default_value = config::CONFIG_PATH)]
    config: PathBuf,
}

// entry 60% / exit 40%, pinned to [0, capacity]
fn step(count: i64, capacity: i64) -> i64 {
    if rand::random::<f64>() < 0.6 {
        (count + 1).min(capacity)
    } else {
        (count - 1).max(0)
    }
}

async fn run(config: SimulatorConfig) -> anyhow::Result<()> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    let mut count = 0_i64;

    for _ in 0..config.steps {
        count = step(count, config.capacity);
        let payload = json!({ "count": count, "capacity": config.capacity });
        match client.post(&config.endpoint).json(&payload).send().await {
            Ok(response) => {
                tracing::info!(count, status = %response.status(), "posted reading");
            }
            Err(e) => tracing::warn!(error = %e, "post failed"),
        }
        time::sleep(config.interval).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Arguments::parse();

    let config = config::load_config(&args.config).await?;
    run(config.simulator).await
}
