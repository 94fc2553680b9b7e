//! Delete and Enrichment Requests

use crate::alert::Alert;
use crate::error::AlertError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Request to tombstone (or restore) one receipt of an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequestBody {
    pub fingerprint: String,
    #[serde(rename = "lastReceived")]
    pub last_received: String,
    #[serde(default)]
    pub restore: bool,
}

/// Request to overwrite or add fields on an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichAlertRequestBody {
    pub enrichments: BTreeMap<String, String>,
    pub fingerprint: String,
}

impl Alert {
    fn ensure_fingerprint(&self, fingerprint: &str) -> Result<(), AlertError> {
        if self.fingerprint != fingerprint {
            warn!(
                expected = %self.fingerprint,
                actual = %fingerprint,
                "Request addressed a different alert"
            );
            return Err(AlertError::FingerprintMismatch {
                expected: self.fingerprint.clone(),
                actual: fingerprint.to_string(),
            });
        }
        Ok(())
    }

    /// Append or remove a receipt in the tombstone log.
    ///
    /// Deleting an already deleted receipt is a no-op; restoring removes every
    /// occurrence of the receipt.
    pub fn apply_delete(&mut self, request: &DeleteRequestBody) -> Result<(), AlertError> {
        self.ensure_fingerprint(&request.fingerprint)?;

        if request.restore {
            let before = self.deleted.len();
            self.deleted.retain(|receipt| receipt != &request.last_received);
            info!(
                fingerprint = %self.fingerprint,
                receipt = %request.last_received,
                removed = before - self.deleted.len(),
                "Alert receipt restored"
            );
        } else if self.deleted.contains(&request.last_received) {
            debug!(
                fingerprint = %self.fingerprint,
                receipt = %request.last_received,
                "Alert receipt already deleted"
            );
        } else {
            self.deleted.push(request.last_received.clone());
            info!(
                fingerprint = %self.fingerprint,
                receipt = %request.last_received,
                "Alert receipt deleted"
            );
        }

        Ok(())
    }

    /// Merge enrichment values into the alert.
    ///
    /// The merged record is validated like an inbound payload, so text values
    /// for flag and counter fields are decoded to their types. On failure the
    /// alert is left unchanged.
    pub fn enrich(&mut self, request: &EnrichAlertRequestBody) -> Result<(), AlertError> {
        self.ensure_fingerprint(&request.fingerprint)?;

        let mut merged = match self.to_value()? {
            Value::Object(map) => map,
            other => {
                return Err(AlertError::InvalidPayload(format!(
                    "alert serialized to a non-object: {other}"
                )))
            }
        };

        for (key, value) in &request.enrichments {
            merged.insert(key.clone(), Value::String(value.clone()));
        }

        *self = Alert::from_value(Value::Object(merged))?;
        debug!(
            fingerprint = %self.fingerprint,
            fields = request.enrichments.len(),
            "Alert enriched"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alert() -> Alert {
        Alert::new("1", "Disk full", "firing", "2021-01-01T00:00:00Z")
    }

    fn delete(receipt: &str, restore: bool) -> DeleteRequestBody {
        DeleteRequestBody {
            fingerprint: "Disk full".to_string(),
            last_received: receipt.to_string(),
            restore,
        }
    }

    fn enrich(pairs: &[(&str, &str)]) -> EnrichAlertRequestBody {
        EnrichAlertRequestBody {
            enrichments: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fingerprint: "Disk full".to_string(),
        }
    }

    #[test]
    fn test_delete_appends_once() {
        let mut alert = alert();
        alert.apply_delete(&delete("t1", false)).unwrap();
        alert.apply_delete(&delete("t2", false)).unwrap();
        alert.apply_delete(&delete("t1", false)).unwrap();
        assert_eq!(alert.deleted, vec!["t1", "t2"]);
    }

    #[test]
    fn test_restore_removes_receipt() {
        let mut alert = alert();
        alert.deleted = vec!["t1".into(), "t2".into(), "t1".into()];
        alert.apply_delete(&delete("t1", true)).unwrap();
        assert_eq!(alert.deleted, vec!["t2"]);

        // restoring something never deleted is fine
        alert.apply_delete(&delete("t9", true)).unwrap();
        assert_eq!(alert.deleted, vec!["t2"]);
    }

    #[test]
    fn test_delete_current_receipt_marks_deleted() {
        let mut alert = alert();
        let receipt = alert.last_received.clone();
        alert.apply_delete(&delete(&receipt, false)).unwrap();
        assert!(alert.is_deleted());
        alert.apply_delete(&delete(&receipt, true)).unwrap();
        assert!(!alert.is_deleted());
    }

    #[test]
    fn test_delete_wrong_fingerprint() {
        let mut alert = alert();
        let mut request = delete("t1", false);
        request.fingerprint = "other".to_string();
        assert!(matches!(
            alert.apply_delete(&request),
            Err(AlertError::FingerprintMismatch { .. })
        ));
        assert!(alert.deleted.is_empty());
    }

    #[test]
    fn test_delete_request_wire_format() {
        let request: DeleteRequestBody =
            serde_json::from_value(json!({"fingerprint": "fp", "lastReceived": "t1"})).unwrap();
        assert_eq!(request, DeleteRequestBody {
            fingerprint: "fp".into(),
            last_received: "t1".into(),
            restore: false,
        });
    }

    #[test]
    fn test_enrich_known_and_unknown_fields() {
        let mut alert = alert();
        alert
            .enrich(&enrich(&[
                ("severity", "critical"),
                ("ticket_url", "https://tickets.example.com/1"),
            ]))
            .unwrap();

        assert_eq!(alert.severity.as_deref(), Some("critical"));
        assert_eq!(
            alert.extra_field("ticket_url"),
            Some(&json!("https://tickets.example.com/1"))
        );
        assert_eq!(alert.fingerprint, "Disk full");
    }

    #[test]
    fn test_enrich_typed_fields_from_text() {
        let mut alert = alert();
        alert
            .enrich(&enrich(&[
                ("pushed", "true"),
                ("isDuplicate", "true"),
                ("fatigueMeter", "3"),
            ]))
            .unwrap();

        assert!(alert.pushed);
        assert_eq!(alert.is_duplicate, Some(true));
        assert_eq!(alert.fatigue_meter, Some(3));
        assert!(alert.extra().is_empty());
    }

    #[test]
    fn test_enrich_unparseable_flag_rejected() {
        let mut alert = alert();
        let before = alert.clone();
        assert!(alert.enrich(&enrich(&[("pushed", "sometimes")])).is_err());
        assert_eq!(alert, before);
    }

    #[test]
    fn test_enrich_failure_leaves_alert_unchanged() {
        let mut alert = alert();
        let before = alert.clone();
        let result = alert.enrich(&enrich(&[("url", "ftp://nope"), ("severity", "low")]));
        assert!(matches!(result, Err(AlertError::InvalidUrl { .. })));
        assert_eq!(alert, before);
    }

    #[test]
    fn test_enrich_wrong_fingerprint() {
        let mut alert = alert();
        let mut request = enrich(&[("severity", "low")]);
        request.fingerprint = "other".into();
        assert!(alert.enrich(&request).is_err());
        assert_eq!(alert.severity, None);
    }
}
