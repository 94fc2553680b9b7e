//! Alert Model
//!
//! Normalized alert records: fingerprint defaulting, legacy field migration,
//! tombstone-based deletion, and enrichment.

mod alert;
mod error;
mod legacy;
mod lenient;
mod request;

pub use alert::{Alert, DEFAULT_ENVIRONMENT};
pub use error::AlertError;
pub use request::{DeleteRequestBody, EnrichAlertRequestBody};
