//! Alerting
//!
//! Noise aggregation: derives the per-read `alerts_count` and
//! `should_do_noise_now` fields of a preset from the alerts it matches.

mod noise;

pub use noise::{NoiseConfig, NoiseEvaluator, NoiseSummary};
