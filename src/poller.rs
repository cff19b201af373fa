// poller is the watch-side loop (entirely separate from axum) which fetches
// the dashboard data and repaints the terminal table

use std::future::Future;

use chrono::Local;
use thiserror::Error;
use tokio::time::{self, MissedTickBehavior};

use crate::config::PollerConfig;
use crate::models::Record;
use crate::{render, shutdown_signal};

const ERROR_TEXT: &str = "Error fetching data";

/// What went wrong during a refresh. Both kinds surface to the user as the
/// same generic status line; the distinction only reaches the log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct Poller {
    client: reqwest::Client,
    endpoint: String,
    rows: Vec<Record>,
    status: String,
}

impl Poller {
    pub fn new(config: &PollerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            rows: Vec::new(),
            status: String::new(),
        })
    }

    /// One poll cycle. On success the row snapshot is replaced by the
    /// response records and the status shows the refresh time; on failure
    /// only the status changes and the previous rows stay put.
    pub async fn refresh(&mut self) {
        match self.fetch().await {
            Ok(rows) => {
                self.rows = rows;
                self.status = format!("Last updated: {}", Local::now().format("%H:%M:%S"));
            }
            Err(e) => {
                tracing::error!(error = %e, endpoint = %self.endpoint, "fetch failed");
                self.status = ERROR_TEXT.to_string();
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let body = response.error_for_status()?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

pub async fn run(config: PollerConfig) -> anyhow::Result<()> {
    run_until(config, shutdown_signal()).await
}

/// Poll loop with an owned, cancellable lifecycle: the first refresh runs
/// immediately, later ones once per interval, and the loop ends when
/// `shutdown` resolves. Refreshes are serialized; a fetch that outlasts the
/// interval delays the next tick instead of overlapping it.
pub async fn run_until(
    config: PollerConfig,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let mut poller = Poller::new(&config)?;
    let mut interval = time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                poller.refresh().await;
                render::draw(poller.rows(), poller.status());
            }
            () = &mut shutdown => break,
        }
    }

    Ok(())
}
