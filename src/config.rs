use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use serde_with::serde_as;
use tokio::fs;

pub const CONFIG_PATH: &str = "Config.toml";

pub async fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    pub bind: String,
}

#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[serde_as]
#[derive(Clone, Deserialize)]
pub struct PollerConfig {
    pub endpoint: String,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub interval: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: Duration,
}

#[serde_as]
#[derive(Clone, Deserialize)]
pub struct SimulatorConfig {
    pub endpoint: String,
    pub capacity: i64,
    pub steps: u32,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub interval: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: Duration,
}

#[derive(Clone, Deserialize)]
pub struct ThingSpeakConfig {
    pub api_key: String,
    #[serde(default = "default_thingspeak_url")]
    pub url: String,
}

fn default_thingspeak_url() -> String {
    "https://api.thingspeak.com/update".to_string()
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub poller: PollerConfig,
    pub simulator: SimulatorConfig,
    pub thingspeak: Option<ThingSpeakConfig>,
}
