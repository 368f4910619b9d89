//! Cell value model.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A single cell value as reported by (or sent to) the automation host.
///
/// This is a closed enumeration of every value category the system handles.
/// Anything outside it is unrepresentable by construction; there is no
/// open-ended fallback for arbitrary types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellScalar {
    /// Missing / not-available sentinel.
    Empty,

    /// Boolean value.
    Bool(bool),

    /// Extended-precision integer, widened to i64 at the transport boundary.
    Int(i64),

    /// Extended-precision float, widened to f64 at the transport boundary.
    Float(f64),

    /// Fixed-point decimal value.
    Decimal(Decimal),

    /// Text value.
    Text(String),

    /// Naive date/time value (no timezone), as spreadsheets store them.
    DateTime(NaiveDateTime),

    /// Timezone-aware timestamp.
    Timestamp(DateTime<Utc>),

    /// Nested array of values (multi-dimensional via nesting).
    Array(Vec<CellScalar>),
}

impl CellScalar {
    /// Returns true for the missing sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Convert an inbound JSON value to a cell scalar.
    ///
    /// Returns `None` for JSON objects, which have no cell representation.
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => Some(Self::Empty),
            JsonValue::Bool(b) => Some(Self::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else {
                    n.as_f64().map(Self::Float)
                }
            }
            JsonValue::String(s) => Some(Self::Text(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Self::Array),
            JsonValue::Object(_) => None,
        }
    }
}

impl fmt::Display for CellScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, ""),
            Self::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Self::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for CellScalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellScalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellScalar {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for CellScalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for CellScalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
