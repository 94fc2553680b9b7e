//! Noise Evaluation

use alert_model::Alert;
use preset_model::{Preset, PresetDto};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Noise configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Statuses that count as noise (default: ["firing"])
    pub noisy_statuses: Vec<String>,
    /// Skip alerts whose current receipt is tombstoned (default: true)
    pub ignore_deleted: bool,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            noisy_statuses: vec!["firing".to_string()],
            ignore_deleted: true,
        }
    }
}

/// Derived fields for one read of a preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseSummary {
    pub should_do_noise_now: bool,
    pub alerts_count: u64,
}

impl NoiseSummary {
    /// Copy the derived fields onto a transfer form
    pub fn apply(self, mut dto: PresetDto) -> PresetDto {
        dto.should_do_noise_now = self.should_do_noise_now;
        dto.alerts_count = self.alerts_count;
        dto
    }
}

/// Computes noise fields from the alerts a preset matches.
///
/// Matching alerts against the preset's cel expression happens upstream;
/// callers pass the already matched alerts.
#[derive(Debug, Clone, Default)]
pub struct NoiseEvaluator {
    config: NoiseConfig,
}

impl NoiseEvaluator {
    /// Create a new evaluator
    pub fn new(config: NoiseConfig) -> Self {
        info!("Creating noise evaluator with config: {:?}", config);
        Self { config }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    fn counts(&self, alert: &Alert) -> bool {
        !(self.config.ignore_deleted && alert.is_deleted())
    }

    /// Whether a single alert is currently doing noise
    pub fn is_doing_noise(&self, alert: &Alert) -> bool {
        self.counts(alert)
            && self
                .config
                .noisy_statuses
                .iter()
                .any(|status| status.eq_ignore_ascii_case(&alert.status))
    }

    /// Summarize the matched alerts of a preset
    pub fn summarize(&self, is_noisy: bool, matched: &[Alert]) -> NoiseSummary {
        let alerts_count = matched.iter().filter(|alert| self.counts(alert)).count() as u64;
        let should_do_noise_now =
            is_noisy && matched.iter().any(|alert| self.is_doing_noise(alert));

        debug!(
            alerts_count,
            is_noisy, should_do_noise_now, "Preset noise summarized"
        );
        NoiseSummary {
            should_do_noise_now,
            alerts_count,
        }
    }

    /// Transfer form of a stored preset with fresh noise fields
    pub fn annotate(&self, preset: &Preset, matched: &[Alert]) -> PresetDto {
        self.summarize(preset.is_noisy, matched)
            .apply(PresetDto::from(preset))
    }

    /// Recompute noise fields on an existing transfer form
    pub fn annotate_dto(&self, dto: PresetDto, matched: &[Alert]) -> PresetDto {
        self.summarize(dto.is_noisy, matched).apply(dto)
    }
}
