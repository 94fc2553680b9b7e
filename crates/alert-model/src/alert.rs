//! Alert Record

use crate::error::AlertError;
use crate::legacy::DeletedField;
use crate::lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

/// Environment assigned when the payload does not name one
pub const DEFAULT_ENVIRONMENT: &str = "undefined";

/// A normalized alert event.
///
/// The field set is open: keys the model does not know about are kept in a
/// side map and written back on serialization, so enrichment data survives a
/// round trip through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlertPayload")]
pub struct Alert {
    pub id: String,
    pub name: String,
    pub status: String,
    /// ISO-8601 timestamp of the latest receipt
    #[serde(rename = "lastReceived")]
    pub last_received: String,
    pub environment: String,
    #[serde(rename = "isDuplicate")]
    pub is_duplicate: Option<bool>,
    #[serde(rename = "duplicateReason")]
    pub duplicate_reason: Option<String>,
    pub service: Option<String>,
    pub source: Option<Vec<String>>,
    pub message: Option<String>,
    pub description: Option<String>,
    pub severity: Option<String>,
    #[serde(rename = "fatigueMeter")]
    pub fatigue_meter: Option<i64>,
    /// Whether the alert was pushed by the provider rather than pulled
    pub pushed: bool,
    /// Database alert id
    pub event_id: Option<String>,
    pub url: Option<String>,
    pub labels: Option<Map<String, Value>>,
    /// Deduplication key, defaults to `name`
    pub fingerprint: String,
    /// Tombstone log of deleted receipts (`lastReceived` values)
    pub deleted: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Inbound shape of an alert before defaults and migrations are applied.
///
/// Scalars are decoded leniently: numbers are accepted for text fields and
/// string forms for flags and counters.
#[derive(Debug, Deserialize)]
pub struct AlertPayload {
    #[serde(deserialize_with = "lenient::text")]
    id: String,
    #[serde(deserialize_with = "lenient::text")]
    name: String,
    #[serde(deserialize_with = "lenient::text")]
    status: String,
    #[serde(rename = "lastReceived", deserialize_with = "lenient::text")]
    last_received: String,
    #[serde(default = "default_environment", deserialize_with = "lenient::text")]
    environment: String,
    #[serde(rename = "isDuplicate", default, deserialize_with = "lenient::opt_flag")]
    is_duplicate: Option<bool>,
    #[serde(rename = "duplicateReason", default, deserialize_with = "lenient::opt_text")]
    duplicate_reason: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    service: Option<String>,
    #[serde(default = "default_source")]
    source: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    severity: Option<String>,
    #[serde(rename = "fatigueMeter", default, deserialize_with = "lenient::opt_i64")]
    fatigue_meter: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pushed: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    event_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    url: Option<String>,
    #[serde(default = "default_labels")]
    labels: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    fingerprint: Option<String>,
    #[serde(default)]
    deleted: DeletedField,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_source() -> Option<Vec<String>> {
    Some(Vec::new())
}

fn default_labels() -> Option<Map<String, Value>> {
    Some(Map::new())
}

impl TryFrom<AlertPayload> for Alert {
    type Error = AlertError;

    fn try_from(payload: AlertPayload) -> Result<Self, Self::Error> {
        if let Some(url) = payload.url.as_deref() {
            validate_url(url)?;
        }

        let fingerprint = match payload.fingerprint {
            Some(fingerprint) => fingerprint,
            None => {
                debug!(alert_id = %payload.id, "No fingerprint supplied, using alert name");
                payload.name.clone()
            }
        };

        Ok(Self {
            id: payload.id,
            name: payload.name,
            status: payload.status,
            last_received: payload.last_received,
            environment: payload.environment,
            is_duplicate: payload.is_duplicate,
            duplicate_reason: payload.duplicate_reason,
            service: payload.service,
            source: payload.source,
            message: payload.message,
            description: payload.description,
            severity: payload.severity,
            fatigue_meter: payload.fatigue_meter,
            pushed: payload.pushed,
            event_id: payload.event_id,
            url: payload.url,
            labels: payload.labels,
            fingerprint,
            deleted: payload.deleted.into_receipts(),
            extra: payload.extra,
        })
    }
}

/// Accept only absolute http(s) URLs
fn validate_url(raw: &str) -> Result<(), AlertError> {
    let parsed = Url::parse(raw).map_err(|e| AlertError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AlertError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {scheme}"),
        }),
    }
}

impl Alert {
    /// Create an alert with every optional field at its default.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: impl Into<String>,
        last_received: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            fingerprint: name.clone(),
            name,
            status: status.into(),
            last_received: last_received.into(),
            environment: default_environment(),
            is_duplicate: None,
            duplicate_reason: None,
            service: None,
            source: default_source(),
            message: None,
            description: None,
            severity: None,
            fatigue_meter: None,
            pushed: false,
            event_id: None,
            url: None,
            labels: default_labels(),
            deleted: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Override the deduplication key
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = fingerprint.into();
        self
    }

    /// Parse and validate an alert from JSON text
    pub fn from_json(json: &str) -> Result<Self, AlertError> {
        let payload: AlertPayload = serde_json::from_str(json)?;
        Self::try_from(payload)
    }

    /// Validate an alert from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, AlertError> {
        let payload: AlertPayload = serde_json::from_value(value)?;
        Self::try_from(payload)
    }

    /// Outbound representation, unknown fields merged back in
    pub fn to_value(&self) -> Result<Value, AlertError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Fields not recognized by the model
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Look up a single unrecognized field
    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// `lastReceived` as a UTC timestamp
    pub fn last_received_at(&self) -> Result<DateTime<Utc>, AlertError> {
        DateTime::parse_from_rfc3339(&self.last_received)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| AlertError::InvalidTimestamp {
                value: self.last_received.clone(),
                reason: e.to_string(),
            })
    }

    /// Whether the current receipt has been tombstoned
    pub fn is_deleted(&self) -> bool {
        self.deleted.iter().any(|receipt| receipt == &self.last_received)
    }
}
