// forwards accepted readings to the ThingSpeak update API when a write key
// is configured; the ingest response never waits on it

use std::time::Duration;

use crate::config::ThingSpeakConfig;

const PUSH_TIMEOUT: Duration = Duration::from_secs(5);

pub fn spawn_push(config: ThingSpeakConfig, count: i64, capacity: i64) {
    tokio::spawn(async move {
        if let Err(e) = push(&config, count, capacity).await {
            tracing::warn!(error = %e, "thingspeak push failed");
        }
    });
}

pub async fn push(config: &ThingSpeakConfig, count: i64, capacity: i64) -> anyhow::Result<()> {
    let client = reqwest::Client::builder().timeout(PUSH_TIMEOUT).build()?;
    let fields = [
        ("api_key", config.api_key.clone()),
        ("field1", count.to_string()),
        ("field2", capacity.to_string()),
    ];
    client.post(&config.url).query(&fields).send().await?;
    Ok(())
}
