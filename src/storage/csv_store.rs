use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{QuoteStyle, ReaderBuilder, Writer, WriterBuilder};
use tracing::info;

use crate::models::{Listing, PostId};
use crate::storage::ListingStore;

const CSV_HEADER: [&str; 8] = [
    "post_id",
    "url",
    "title",
    "price_dkk",
    "desc",
    "location",
    "date",
    "condition_text",
];

struct Inner {
    writer: Writer<File>,
    sync_handle: File,
    seen: HashSet<String>,
}

/// Append-only CSV output with per-id deduplication across runs. All fields
/// are quoted with `\` as the escape character; every row is flushed and
/// fsynced before the next fetch starts.
pub struct CsvStore {
    inner: Mutex<Inner>,
}

impl CsvStore {
    pub fn open(path: &str) -> Result<Self> {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let seen = load_seen_ids(path)?;
        if !seen.is_empty() {
            info!(
                "Loaded {} previously seen listing ids from {}",
                seen.len(),
                path.display()
            );
        }

        let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let sync_handle = file.try_clone()?;

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .double_quote(false)
            .escape(b'\\')
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                writer,
                sync_handle,
                seen,
            }),
        })
    }
}

#[async_trait]
impl ListingStore for CsvStore {
    async fn has_seen(&self, id: &PostId) -> Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.seen.contains(&id.0))
    }

    async fn append(&self, listing: &Listing) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();

        inner.writer.serialize(listing)?;
        inner.writer.flush()?;
        // Durability per row, at the cost of throughput.
        inner.sync_handle.sync_data()?;

        inner.seen.insert(listing.post_id.0.clone());
        Ok(())
    }
}

fn load_seen_ids(path: &Path) -> Result<HashSet<String>> {
    let mut seen = HashSet::new();
    if !path.exists() {
        return Ok(seen);
    }

    let file = File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut reader = ReaderBuilder::new()
        .double_quote(false)
        .escape(Some(b'\\'))
        .flexible(true)
        .from_reader(file);

    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed row in {}", path.display()))?;
        if let Some(id) = record.get(0) {
            if !id.is_empty() {
                seen.insert(id.to_string());
            }
        }
    }

    Ok(seen)
}
