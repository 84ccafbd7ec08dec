pub mod listing;

pub use listing::*;

// Placeholder literals written into rows when a field cannot be extracted
pub const CONDITION_NOT_SPECIFIED: &str = "Not specified";
pub const DESCRIPTION_FALLBACK: &str = "Ingen desc (auto)";
pub const POST_ID_UNKNOWN: &str = "unknown";
