//! Preset Error Types

use thiserror::Error;
use uuid::Uuid;

/// Errors while constructing or changing a preset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresetError {
    /// Payload failed to deserialize
    #[error("Invalid preset payload: {0}")]
    InvalidPayload(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Id belongs to a system preset
    #[error("Preset id {0} is reserved for a system preset")]
    ReservedId(Uuid),

    /// Name belongs to a system preset
    #[error("Preset name {0:?} is reserved for a system preset")]
    ReservedName(String),

    /// Name already taken within the tenant
    #[error("Preset {name:?} already exists for tenant {tenant_id}")]
    DuplicateName { tenant_id: String, name: String },
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        PresetError::InvalidPayload(err.to_string())
    }
}
