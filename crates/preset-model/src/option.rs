//! Preset Options and CEL Query Extraction

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Label that marks the filter-expression option
pub const CEL_LABEL: &str = "cel";

/// Option value: a query string or a structured (cel/sql) filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Structured(Map<String, Value>),
    /// Anything else a stored preset carries (null, numbers, lists)
    Other(Value),
}

impl Default for OptionValue {
    fn default() -> Self {
        OptionValue::Text(String::new())
    }
}

impl OptionValue {
    /// Query text; structured and other values are rendered as compact JSON,
    /// null as an empty string
    pub fn as_query(&self) -> String {
        match self {
            OptionValue::Text(text) => text.clone(),
            OptionValue::Structured(map) => Value::Object(map.clone()).to_string(),
            OptionValue::Other(Value::Null) => String::new(),
            OptionValue::Other(Value::String(text)) => text.clone(),
            OptionValue::Other(value) => value.to_string(),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(text: &str) -> Self {
        OptionValue::Text(text.to_string())
    }
}

/// One label/value clause of a preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: OptionValue,
}

impl PresetOption {
    pub fn new(label: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Whether this clause carries the cel expression (label match ignores case)
    pub fn is_cel(&self) -> bool {
        self.label.to_lowercase() == CEL_LABEL
    }
}

/// Extract the cel expression from a preset's options.
///
/// Exactly one cel clause yields its value. None, or more than one, yields an
/// empty string, which callers treat as "no expression".
pub fn cel_query(options: &[PresetOption]) -> String {
    let mut matches = options.iter().filter(|option| option.is_cel());

    match (matches.next(), matches.next()) {
        (Some(option), None) => option.value.as_query(),
        (None, _) => {
            debug!("Preset has no cel option");
            String::new()
        }
        (Some(_), Some(_)) => {
            warn!(
                count = 2 + matches.count(),
                "Preset has multiple cel options, ignoring all"
            );
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> Vec<PresetOption> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_single_cel_option_case_insensitive() {
        let opts = options(json!([{"label": "CEL", "value": "sev=='high'"}]));
        assert_eq!(cel_query(&opts), "sev=='high'");
    }

    #[test]
    fn test_cel_among_other_options() {
        let opts = options(json!([
            {"label": "source", "value": "grafana"},
            {"label": "Cel", "value": "status == 'firing'"},
            {"label": "sql", "value": {"sql": "status = :s", "params": {"s": "firing"}}},
        ]));
        assert_eq!(cel_query(&opts), "status == 'firing'");
    }

    #[test]
    fn test_no_cel_option() {
        assert_eq!(cel_query(&[]), "");
        let opts = options(json!([{"label": "sql", "value": "x"}]));
        assert_eq!(cel_query(&opts), "");
    }

    #[test]
    fn test_multiple_cel_options() {
        let opts = options(json!([
            {"label": "cel", "value": "a"},
            {"label": "CEL", "value": "b"},
        ]));
        assert_eq!(cel_query(&opts), "");

        let opts = options(json!([
            {"label": "cel", "value": "a"},
            {"label": "cel", "value": "b"},
            {"label": "cel", "value": "c"},
        ]));
        assert_eq!(cel_query(&opts), "");
    }

    #[test]
    fn test_structured_cel_value() {
        let opts = options(json!([{"label": "cel", "value": {"op": "eq"}}]));
        assert_eq!(cel_query(&opts), r#"{"op":"eq"}"#);
    }

    #[test]
    fn test_non_text_option_values_accepted() {
        let opts = options(json!([
            {"label": "sql", "value": null},
            {"label": "limit", "value": 25},
            {"label": "cel", "value": ["a", "b"]},
        ]));
        assert_eq!(opts[0].value, OptionValue::Other(Value::Null));
        assert_eq!(opts[0].value.as_query(), "");
        assert_eq!(opts[1].value.as_query(), "25");
        assert_eq!(cel_query(&opts), r#"["a","b"]"#);

        let out = serde_json::to_value(&opts).unwrap();
        assert_eq!(out[1]["value"], json!(25));
    }

    #[test]
    fn test_lenient_option_shape() {
        let opts = options(json!([{"value": "x"}, {"label": "cel", "extra": 1}]));
        assert_eq!(opts[0].label, "");
        assert_eq!(opts[1].value, OptionValue::default());
        assert_eq!(cel_query(&opts), "");
    }

    #[test]
    fn test_label_must_match_exactly_after_lowercasing() {
        assert!(!PresetOption::new(" cel", "x").is_cel());
        assert!(!PresetOption::new("cel2", "x").is_cel());
        assert!(PresetOption::new("cEL", "x").is_cel());
    }
}
