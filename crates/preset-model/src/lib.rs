//! Preset Model
//!
//! Saved alert filters ("presets"): stored and transfer forms, cel query
//! extraction, reserved system presets, and id generation.

mod error;
mod id;
mod option;
mod preset;
mod static_presets;

pub use error::PresetError;
pub use id::{IdGenerator, RandomIds, SequentialIds};
pub use option::{cel_query, OptionValue, PresetOption, CEL_LABEL};
pub use preset::{
    ensure_deletable, ensure_unique_name, find_preset_by_name, Preset, PresetDraft, PresetDto,
};
pub use static_presets::{default_presets, is_reserved_id, StaticPresetId};
