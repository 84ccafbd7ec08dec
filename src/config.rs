use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search-result page the pagination crawl starts from. The `page` query
    /// parameter is overwritten per page; every other parameter is kept.
    pub search_url: String,
    pub max_pages: u32,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Politeness delay slept before every single fetch, uniformly random
    /// within these bounds.
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    pub output_csv: String,
    /// Newline-delimited listing-URL cache. When the file exists the
    /// pagination crawl is skipped and its URLs are fetched directly.
    pub url_cache: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Config {
            search_url: "https://www.dba.dk/recommerce/forsale/search?q=cykel&sort=PUBLISHED_DESC"
                .to_string(),
            max_pages: 10,
            user_agent: "Mozilla/5.0".to_string(),
            request_timeout_secs: 15,
            delay_min_ms: 2000,
            delay_max_ms: 4000,
            output_csv: "data/raw_auto.csv".to_string(),
            url_cache: "data/listing_urls.txt".to_string(),
        })
    }
}
