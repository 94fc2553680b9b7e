//! Reserved System Presets

use crate::preset::PresetDto;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// System presets with fixed ids.
///
/// `11111111-1111-1111-1111-111111111112` belonged to the retired "deleted"
/// preset and is not reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticPresetId {
    /// Default alert feed
    Feed,
    Dismissed,
    Groups,
}

impl StaticPresetId {
    pub const ALL: [StaticPresetId; 3] = [
        StaticPresetId::Feed,
        StaticPresetId::Dismissed,
        StaticPresetId::Groups,
    ];

    pub const fn id(self) -> Uuid {
        match self {
            StaticPresetId::Feed => Uuid::from_u128(0x11111111_1111_1111_1111_111111111111),
            StaticPresetId::Dismissed => Uuid::from_u128(0x11111111_1111_1111_1111_111111111113),
            StaticPresetId::Groups => Uuid::from_u128(0x11111111_1111_1111_1111_111111111114),
        }
    }

    pub const fn preset_name(self) -> &'static str {
        match self {
            StaticPresetId::Feed => "feed",
            StaticPresetId::Dismissed => "dismissed",
            StaticPresetId::Groups => "groups",
        }
    }

    pub fn from_uuid(id: &Uuid) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.id() == *id)
    }

    /// Case-insensitive name lookup
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|preset| preset.preset_name() == name)
    }

    /// Transfer form with no options and zeroed counters
    pub fn dto(self) -> PresetDto {
        PresetDto::new(self.id(), self.preset_name())
    }
}

impl std::fmt::Display for StaticPresetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.preset_name())
    }
}

/// Whether `id` identifies a system preset
pub fn is_reserved_id(id: &Uuid) -> bool {
    StaticPresetId::from_uuid(id).is_some()
}

/// The system presets, in display order
pub fn default_presets() -> Vec<PresetDto> {
    StaticPresetId::ALL.into_iter().map(StaticPresetId::dto).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ids() {
        assert_eq!(
            StaticPresetId::Feed.id().to_string(),
            "11111111-1111-1111-1111-111111111111"
        );
        assert_eq!(
            StaticPresetId::Dismissed.id().to_string(),
            "11111111-1111-1111-1111-111111111113"
        );
        assert_eq!(
            StaticPresetId::Groups.id().to_string(),
            "11111111-1111-1111-1111-111111111114"
        );
    }

    #[test]
    fn test_retired_id_not_reserved() {
        let retired: Uuid = "11111111-1111-1111-1111-111111111112".parse().unwrap();
        assert!(!is_reserved_id(&retired));
        assert!(is_reserved_id(&StaticPresetId::Groups.id()));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(
            StaticPresetId::from_uuid(&StaticPresetId::Dismissed.id()),
            Some(StaticPresetId::Dismissed)
        );
        assert_eq!(StaticPresetId::from_name("FEED"), Some(StaticPresetId::Feed));
        assert_eq!(StaticPresetId::from_name("deleted"), None);
    }

    #[test]
    fn test_default_presets() {
        let presets = default_presets();
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["feed", "dismissed", "groups"]);
        assert!(presets.iter().all(|p| p.options.is_empty() && p.alerts_count == 0));
        assert!(presets.iter().all(|p| !p.is_private && !p.is_noisy));
    }
}
