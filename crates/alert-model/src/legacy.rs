//! Legacy Field Migrations
//!
//! Older records stored `deleted` as a boolean flag. The current schema keeps a
//! tombstone log of receipt timestamps instead.

use serde::Deserialize;
use tracing::debug;

/// `deleted` as it may appear in a stored or inbound payload
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum DeletedField {
    /// Pre-tombstone boolean flag
    Legacy(bool),
    /// Receipt timestamps that were deleted
    Receipts(Vec<String>),
}

impl Default for DeletedField {
    fn default() -> Self {
        DeletedField::Receipts(Vec::new())
    }
}

impl DeletedField {
    /// Normalize to the tombstone log.
    ///
    /// A legacy flag is dropped, even `true`: the old flag cannot be mapped to
    /// individual receipts, so nothing is carried over.
    pub(crate) fn into_receipts(self) -> Vec<String> {
        match self {
            DeletedField::Legacy(flag) => {
                debug!(legacy_value = flag, "Discarding legacy boolean deleted field");
                Vec::new()
            }
            DeletedField::Receipts(receipts) => receipts,
        }
    }
}
