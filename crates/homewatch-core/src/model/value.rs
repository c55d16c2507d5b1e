use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// A single reading as the backend sent it, native type preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays and objects (e.g. a gyroscope triple).
    Other(Value),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are negative,
    /// everything else (including `"0"` and empty containers) is positive.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Other(_) => true,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Integral numbers only; `3.0` counts, `3.5` does not.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Other(value.clone()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Other(value.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

// ── Timestamp ────────────────────────────────────────────────────────

/// When a reading was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    At(DateTime<Utc>),
    /// Present but unparseable; shown as-is.
    Raw(String),
    Missing,
}

impl Timestamp {
    /// Accepts RFC 3339 strings, offset-less ISO date-times (taken as local
    /// time) and epoch milliseconds.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) => Self::parse_str(s),
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(|ms| DateTime::from_timestamp_millis(ms as i64))
                .map_or_else(|| Self::Raw(n.to_string()), Self::At),
            Some(other) => Self::Raw(other.to_string()),
        }
    }

    fn parse_str(s: &str) -> Self {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Self::At(dt.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"));
        match naive.ok().and_then(|n| Local.from_local_datetime(&n).earliest()) {
            Some(local) => Self::At(local.with_timezone(&Utc)),
            None => Self::Raw(s.to_owned()),
        }
    }

    /// Format in the viewer's local time zone.
    pub fn local_display(&self) -> String {
        match self {
            Self::At(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Self::Raw(s) => s.clone(),
            Self::Missing => crate::render::PLACEHOLDER.to_owned(),
        }
    }
}
