use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Listing, PostId};

mod csv_store;
mod urls;

pub use csv_store::CsvStore;
pub use urls::{read_cached_urls, write_url_cache};

#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn has_seen(&self, id: &PostId) -> Result<bool>;
    /// Serialize one record, make it durable, and mark its id seen.
    async fn append(&self, listing: &Listing) -> Result<()>;
}
