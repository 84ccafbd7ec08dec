use std::collections::HashSet;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::utils::http::delayed_fetch;

static ITEM_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/item/(\d+)").expect("Invalid item path regex"));

/// Walk the paginated search results and collect listing URLs in discovery
/// order. Stops at `max_pages`, on the first page that contributes nothing
/// new (end of results), or on a failed fetch.
pub async fn collect_listing_urls(client: &Client, config: &Config) -> Result<Vec<String>> {
    let base = Url::parse(&config.search_url).context("Invalid search URL")?;

    let mut urls = Vec::new();
    let mut seen = HashSet::new();

    for page in 1..=config.max_pages {
        let page_url = with_page_param(&base, page);
        info!("Fetching search page {} ({})", page, page_url);

        let html = match delayed_fetch(
            client,
            page_url.as_str(),
            config.delay_min_ms,
            config.delay_max_ms,
        )
        .await
        {
            Ok(html) => html,
            Err(e) => {
                warn!("Search page {} failed, stopping pagination: {}", page, e);
                break;
            }
        };

        let mut added = 0;
        for link in extract_item_links(&html, &page_url) {
            if seen.insert(link.clone()) {
                urls.push(link);
                added += 1;
            }
        }

        info!(
            "Search page {} contributed {} new listings ({} total)",
            page,
            added,
            urls.len()
        );
        if added == 0 {
            break;
        }
    }

    Ok(urls)
}

/// Rewrite the `page` query parameter, keeping every other pair intact.
fn with_page_param(base: &Url, page: u32) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        pairs.append_pair("page", &page.to_string());
    }
    url
}

/// Hrefs on a search page that point at a listing, resolved to absolute URLs.
fn extract_item_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a") {
        for anchor in document.select(&anchor_selector) {
            if let Some(href) = anchor.value().attr("href") {
                if ITEM_PATH_REGEX.is_match(href) {
                    if let Ok(resolved) = page_url.join(href) {
                        links.push(resolved.to_string());
                    }
                }
            }
        }
    }

    links
}
