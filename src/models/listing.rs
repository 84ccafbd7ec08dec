use serde::{Deserialize, Serialize};
use std::fmt;

// NewType pattern for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub String);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One classified-ad page, as extracted. Field order is the CSV column order.
///
/// Records are immutable once produced; deduplication happens against the
/// output file's accumulated `post_id` set, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub post_id: PostId,
    pub url: String,
    pub title: String,
    /// `None` when no price could be parsed; the row is still written with an
    /// empty price field so it can be inspected manually.
    pub price_dkk: Option<u32>,
    pub desc: String,
    pub location: String,
    /// Free-text "Sidst redigeret" label, empty when the page carries none.
    pub date: String,
    pub condition_text: String,
}
