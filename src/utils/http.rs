use rand::Rng;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::debug;

use crate::config::Config;

/// Why a single fetch was abandoned. Callers log the variant and skip the
/// URL; neither case aborts a run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP status {0}")]
    Status(StatusCode),
}

pub fn create_client(config: &Config) -> anyhow::Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    Ok(client)
}

/// Sleep a random politeness interval, then GET the URL exactly once and
/// return the body. No retries.
pub async fn delayed_fetch(
    client: &Client,
    url: &str,
    delay_min_ms: u64,
    delay_max_ms: u64,
) -> Result<String, FetchError> {
    let pause = rand::thread_rng().gen_range(delay_min_ms..=delay_max_ms);
    debug!("Sleeping {}ms before fetching {}", pause, url);
    sleep(Duration::from_millis(pause)).await;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text().await?)
}
