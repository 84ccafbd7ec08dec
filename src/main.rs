use anyhow::Result;
use chrono::Local;
use tracing::{error, info, warn};

mod collector;
mod config;
mod models;
mod parsers;
mod storage;
mod utils;

use crate::config::Config;
use crate::parsers::parse_listing;
use crate::storage::{read_cached_urls, write_url_cache, CsvStore, ListingStore};
use crate::utils::http::{create_client, delayed_fetch};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dba_scraper=info".parse()?),
        )
        .init();

    info!(
        "Starting DBA scraper at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let config = Config::load()?;
    let client = create_client(&config)?;

    // A pre-existing URL cache bypasses the pagination crawl entirely.
    let urls = match read_cached_urls(&config.url_cache)? {
        Some(urls) => urls,
        None => {
            let urls = collector::collect_listing_urls(&client, &config).await?;
            write_url_cache(&config.url_cache, &urls)?;
            urls
        }
    };
    info!("{} listing URLs to process", urls.len());

    let store = CsvStore::open(&config.output_csv)?;

    let mut written = 0;
    let mut skipped = 0;

    for url in &urls {
        let html = match delayed_fetch(&client, url, config.delay_min_ms, config.delay_max_ms).await
        {
            Ok(html) => html,
            Err(e) => {
                error!("Fetch failed for {}: {}", url, e);
                skipped += 1;
                continue;
            }
        };

        let listing = parse_listing(&html, url);

        if store.has_seen(&listing.post_id).await? {
            skipped += 1;
            continue;
        }

        if listing.price_dkk.is_none() {
            warn!("No price parsed for {}, writing row with empty price field", url);
        }

        store.append(&listing).await?;
        written += 1;
        info!("Wrote listing {} ({})", listing.post_id, url);
    }

    info!("Run complete: {} rows written, {} skipped", written, skipped);
    Ok(())
}
