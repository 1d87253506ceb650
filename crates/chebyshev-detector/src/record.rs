//! Typed input and output records exchanged with a harness.
//!
//! Records arrive as loosely-typed rows (`{"timestamp": ..., "value": ...}`).
//! Only `value` is read by the detector; the timestamp is carried through so
//! scored output lines up with the input stream.

use chrono::{DateTime, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::DetectorResult;

/// One record from the record source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// When the value was observed, if the source provides it.
    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<NaiveDateTime>,
    /// The scalar being scored. Accepts a JSON number or a numeric string.
    #[serde(with = "float_text")]
    pub value: f64,
}

impl InputRecord {
    /// A record with no timestamp.
    pub fn new(value: f64) -> Self {
        Self {
            timestamp: None,
            value,
        }
    }

    pub fn at(timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            value,
        }
    }

    /// Parse a single JSON-lines record.
    pub fn from_json_line(line: &str) -> DetectorResult<Self> {
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// What a detector hands back for each record: a single anomaly score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectorOutput {
    #[serde(with = "float_text")]
    pub anomaly_score: f64,
}

impl DetectorOutput {
    pub fn new(anomaly_score: f64) -> Self {
        Self { anomaly_score }
    }
}

/// An input record joined with its score.
///
/// Non-finite values and scores are written as the strings `"inf"`, `"-inf"`
/// and `"NaN"`, and read back from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(with = "float_text")]
    pub value: f64,
    #[serde(with = "float_text")]
    pub anomaly_score: f64,
}

impl ScoredRecord {
    pub fn new(record: &InputRecord, output: DetectorOutput) -> Self {
        Self {
            timestamp: record.timestamp,
            value: record.value,
            anomaly_score: output.anomaly_score,
        }
    }
}

/// Parse a record timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, ISO-8601 without offset (optionally with
/// fractional seconds), and RFC 3339 (converted to UTC).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.naive_utc()))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| {
        parse_timestamp(&s)
            .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", s, e)))
    })
    .transpose()
}

/// Floats as JSON numbers, with non-finite values spelled out as strings.
///
/// JSON has no literal for infinity or NaN, and `serde_json` would emit
/// `null` for both. Reading accepts any number or numeric string.
mod float_text {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            // `inf`, `-inf`, `NaN`
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawValue::deserialize(deserializer)? {
            RawValue::Number(v) => Ok(v),
            RawValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| de::Error::custom(format!("value {:?} is not a number: {}", s, e))),
        }
    }
}
