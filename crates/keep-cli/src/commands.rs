//! Command Implementations
//!
//! Each command takes JSON text and returns the text to print, so the binary
//! only deals with reading inputs.

use alert_model::{Alert, DeleteRequestBody, EnrichAlertRequestBody};
use alerting::NoiseEvaluator;
use anyhow::{Context, Result};
use preset_model::{default_presets, PresetDto};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

/// A JSON document holding one item or an array of items
fn one_or_many(input: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    Ok(match value {
        Value::Array(items) => items,
        single => vec![single],
    })
}

fn parse_all<T: DeserializeOwned>(input: &str, what: &str) -> Result<Vec<T>> {
    one_or_many(input)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item).with_context(|| format!("Invalid {what} at index {i}"))
        })
        .collect()
}

fn parse_alerts(input: &str) -> Result<Vec<Alert>> {
    one_or_many(input)?
        .into_iter()
        .enumerate()
        .map(|(i, item)| Alert::from_value(item).with_context(|| format!("Invalid alert at index {i}")))
        .collect()
}

fn parse_alert(input: &str) -> Result<Alert> {
    Alert::from_json(input).context("Invalid alert")
}

fn render_alert(alert: &Alert) -> Result<String> {
    Ok(serde_json::to_string_pretty(&alert.to_value()?)?)
}

/// Validate alert payloads and print them with defaults and migrations applied
pub fn normalize_alerts(input: &str) -> Result<String> {
    let alerts = parse_alerts(input)?;
    info!(count = alerts.len(), "Normalized alerts");

    let values = alerts
        .iter()
        .map(Alert::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string_pretty(&values)?)
}

/// Tombstone or restore a receipt on a single alert
pub fn delete_receipt(alert: &str, request: &str) -> Result<String> {
    let mut alert = parse_alert(alert)?;
    let request: DeleteRequestBody =
        serde_json::from_str(request).context("Invalid delete request")?;
    alert.apply_delete(&request)?;
    render_alert(&alert)
}

/// Merge enrichments into a single alert
pub fn enrich_alert(alert: &str, request: &str) -> Result<String> {
    let mut alert = parse_alert(alert)?;
    let request: EnrichAlertRequestBody =
        serde_json::from_str(request).context("Invalid enrichment request")?;
    alert.enrich(&request)?;
    render_alert(&alert)
}

/// One `name<TAB>query` line per preset
pub fn cel_queries(input: &str) -> Result<String> {
    let presets: Vec<PresetDto> = parse_all(input, "preset")?;
    Ok(presets
        .iter()
        .map(|preset| format!("{}\t{}", preset.name, preset.cel_query()))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Attach noise fields to each preset, treating every alert as matched
pub fn annotate_presets(presets: &str, alerts: &str, evaluator: &NoiseEvaluator) -> Result<String> {
    let presets: Vec<PresetDto> = parse_all(presets, "preset")?;
    let alerts = parse_alerts(alerts)?;

    let annotated: Vec<PresetDto> = presets
        .into_iter()
        .map(|preset| evaluator.annotate_dto(preset, &alerts))
        .collect();
    Ok(serde_json::to_string_pretty(&annotated)?)
}

/// The reserved system presets
pub fn system_presets() -> Result<String> {
    Ok(serde_json::to_string_pretty(&default_presets())?)
}
