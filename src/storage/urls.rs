use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Read the newline-delimited listing-URL cache, if one exists. A present
/// cache bypasses the pagination crawl entirely.
pub fn read_cached_urls(path: &str) -> Result<Option<Vec<String>>> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL cache {}", path))?;
    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!("Loaded {} cached listing URLs from {}", urls.len(), path);
    Ok(Some(urls))
}

/// Cache discovered listing URLs, one per line, replacing any previous cache.
pub fn write_url_cache(path: &str, urls: &[String]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut content = urls.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write URL cache {}", path))?;

    Ok(())
}
