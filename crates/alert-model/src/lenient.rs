//! Lenient Scalar Decoding
//!
//! Providers are loose about scalar types: ids arrive as numbers, flags and
//! counters arrive as strings. These `deserialize_with` helpers accept the
//! alternative forms and normalize them to the field's declared type.

use serde::{Deserialize, Deserializer};
use serde_json::Number;

/// A JSON scalar in any of the forms a provider may send
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    fn into_text<E: serde::de::Error>(self) -> Result<String, E> {
        match self {
            Scalar::Text(text) => Ok(text),
            Scalar::Number(number) => Ok(number.to_string()),
            Scalar::Bool(flag) => Err(E::custom(format!("expected a string, found boolean {flag}"))),
        }
    }

    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            Scalar::Bool(flag) => Ok(flag),
            Scalar::Number(number) => match number.as_i64() {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                _ => Err(E::custom(format!("expected a boolean, found number {number}"))),
            },
            Scalar::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "on" | "t" | "true" | "y" | "yes" => Ok(true),
                "0" | "off" | "f" | "false" | "n" | "no" => Ok(false),
                _ => Err(E::custom(format!("expected a boolean, found \"{text}\""))),
            },
        }
    }

    fn into_i64<E: serde::de::Error>(self) -> Result<i64, E> {
        match self {
            Scalar::Number(number) => number
                .as_i64()
                .or_else(|| {
                    number
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                        .map(|f| f as i64)
                })
                .ok_or_else(|| E::custom(format!("expected an integer, found number {number}"))),
            Scalar::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, found \"{text}\""))),
            Scalar::Bool(flag) => Err(E::custom(format!("expected an integer, found boolean {flag}"))),
        }
    }
}

pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Scalar::deserialize(deserializer)?.into_text()
}

pub(crate) fn opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .transpose()
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Scalar::deserialize(deserializer)?.into_bool()
}

pub(crate) fn opt_flag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<bool>, D::Error> {
    Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_bool)
        .transpose()
}

pub(crate) fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_i64)
        .transpose()
}
