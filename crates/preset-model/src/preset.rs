//! Preset Records
//!
//! `Preset` is the stored, tenant-scoped form. `PresetDto` is what readers
//! receive: no tenant, plus noise fields computed per read.

use crate::error::PresetError;
use crate::id::IdGenerator;
use crate::option::{cel_query, PresetOption};
use crate::static_presets::{is_reserved_id, StaticPresetId};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Stored preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: Uuid,
    pub tenant_id: String,
    pub created_by: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_noisy: bool,
    pub name: String,
    pub options: Vec<PresetOption>,
}

/// User-supplied fields for a new preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDraft {
    pub name: String,
    pub options: Vec<PresetOption>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_noisy: bool,
}

fn validate_name(name: &str) -> Result<(), PresetError> {
    if name.trim().is_empty() {
        return Err(PresetError::MissingField("name"));
    }
    if let Some(reserved) = StaticPresetId::from_name(name) {
        warn!(preset = name, %reserved, "Rejected system preset name");
        return Err(PresetError::ReservedName(name.to_string()));
    }
    Ok(())
}

impl Preset {
    /// Create a stored preset from a draft, taking a fresh id from `ids`
    pub fn create(
        tenant_id: impl Into<String>,
        created_by: impl Into<String>,
        draft: PresetDraft,
        ids: &dyn IdGenerator,
    ) -> Result<Self, PresetError> {
        validate_name(&draft.name)?;

        let id = ids.next_id();
        if is_reserved_id(&id) {
            warn!(%id, "Generated id collides with a system preset");
            return Err(PresetError::ReservedId(id));
        }

        let preset = Self {
            id,
            tenant_id: tenant_id.into(),
            created_by: created_by.into(),
            is_private: draft.is_private,
            is_noisy: draft.is_noisy,
            name: draft.name,
            options: draft.options,
        };
        info!(id = %preset.id, preset = %preset.name, tenant = %preset.tenant_id, "Preset created");
        Ok(preset)
    }

    /// Parse a stored preset from JSON text
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Change the name; system presets cannot be renamed
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), PresetError> {
        if is_reserved_id(&self.id) {
            return Err(PresetError::ReservedId(self.id));
        }
        let name = name.into();
        validate_name(&name)?;

        info!(id = %self.id, from = %self.name, to = %name, "Preset renamed");
        self.name = name;
        Ok(())
    }

    /// The cel expression from this preset's options, or `""`
    pub fn cel_query(&self) -> String {
        cel_query(&self.options)
    }
}

/// Reject deletion of system presets
pub fn ensure_deletable(id: &Uuid) -> Result<(), PresetError> {
    if is_reserved_id(id) {
        warn!(%id, "Refusing to delete a system preset");
        return Err(PresetError::ReservedId(*id));
    }
    Ok(())
}

/// Reject `name` if another preset of the same tenant already uses it.
///
/// `exclude` skips the preset being renamed.
pub fn ensure_unique_name<'a>(
    existing: impl IntoIterator<Item = &'a Preset>,
    tenant_id: &str,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<(), PresetError> {
    let taken = existing.into_iter().any(|preset| {
        preset.tenant_id == tenant_id && preset.name == name && Some(preset.id) != exclude
    });

    if taken {
        return Err(PresetError::DuplicateName {
            tenant_id: tenant_id.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Preset as returned to readers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub options: Vec<PresetOption>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_private: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_noisy: bool,
    /// Noisy preset with at least one alert currently doing noise
    #[serde(default, deserialize_with = "null_as_default")]
    pub should_do_noise_now: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alerts_count: u64,
}

impl PresetDto {
    /// Transfer form with no options, public, not noisy and no alerts counted
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            options: Vec::new(),
            created_by: None,
            is_private: false,
            is_noisy: false,
            should_do_noise_now: false,
            alerts_count: 0,
        }
    }

    /// See [`Preset::cel_query`]
    pub fn cel_query(&self) -> String {
        cel_query(&self.options)
    }
}

impl From<&Preset> for PresetDto {
    fn from(preset: &Preset) -> Self {
        Self {
            id: preset.id,
            name: preset.name.clone(),
            options: preset.options.clone(),
            created_by: Some(preset.created_by.clone()),
            is_private: preset.is_private,
            is_noisy: preset.is_noisy,
            should_do_noise_now: false,
            alerts_count: 0,
        }
    }
}

/// First preset whose lowercased name equals `name`
pub fn find_preset_by_name<'a>(presets: &'a [PresetDto], name: &str) -> Option<&'a PresetDto> {
    presets
        .iter()
        .find(|preset| preset.name.to_lowercase() == name)
}
