//! Type-widening conversion from cell values to JSON primitives.

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Number, Value as JsonValue};
use thiserror::Error;

use crate::value::CellScalar;

/// Errors raised while widening a cell value to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value has no JSON representation.
    #[error("Value is not JSON serializable: {0}")]
    NotSerializable(String),
}

/// Widen a cell value to a JSON-native value.
///
/// The conversion table, first match wins:
///
/// - integers stay integers
/// - floats stay floats; non-finite floats become `null` (they are the
///   missing-value sentinel on the wire)
/// - decimals become floats, accepting precision loss
/// - date/time values become ISO-8601 strings
/// - arrays convert element-wise, preserving nesting
/// - the missing sentinel becomes `null`
///
/// Pure function of its input. The one failure case is a decimal outside the
/// f64 range, which is rejected rather than silently mangled.
pub fn widen(value: &CellScalar) -> Result<JsonValue, EncodeError> {
    match value {
        CellScalar::Empty => Ok(JsonValue::Null),
        CellScalar::Bool(b) => Ok(JsonValue::Bool(*b)),
        CellScalar::Int(i) => Ok(JsonValue::Number(Number::from(*i))),
        CellScalar::Float(v) => Ok(Number::from_f64(*v)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)),
        CellScalar::Decimal(d) => {
            let v = d
                .to_f64()
                .and_then(Number::from_f64)
                .ok_or_else(|| EncodeError::NotSerializable(format!("decimal {d}")))?;
            Ok(JsonValue::Number(v))
        }
        CellScalar::Text(s) => Ok(JsonValue::String(s.clone())),
        CellScalar::DateTime(dt) => Ok(JsonValue::String(
            dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        )),
        CellScalar::Timestamp(ts) => Ok(JsonValue::String(ts.to_rfc3339())),
        CellScalar::Array(items) => {
            let widened = items.iter().map(widen).collect::<Result<Vec<_>, _>>()?;
            Ok(JsonValue::Array(widened))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn widens_integers_and_floats() {
        assert_eq!(widen(&CellScalar::Int(42)).unwrap(), serde_json::json!(42));
        assert_eq!(
            widen(&CellScalar::Float(2.5)).unwrap(),
            serde_json::json!(2.5)
        );
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(
            widen(&CellScalar::Float(f64::NAN)).unwrap(),
            JsonValue::Null
        );
        assert_eq!(
            widen(&CellScalar::Float(f64::INFINITY)).unwrap(),
            JsonValue::Null
        );
    }

    #[test]
    fn widens_decimal_to_float() {
        let d = Decimal::new(1050, 2); // 10.50
        assert_eq!(
            widen(&CellScalar::Decimal(d)).unwrap(),
            serde_json::json!(10.5)
        );
    }

    #[test]
    fn widens_datetime_to_iso8601() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            widen(&CellScalar::DateTime(dt)).unwrap(),
            serde_json::json!("2024-01-15T10:30:00")
        );

        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            widen(&CellScalar::Timestamp(ts)).unwrap(),
            serde_json::json!("2024-01-15T10:30:00+00:00")
        );
    }

    #[test]
    fn widens_empty_to_null() {
        assert_eq!(widen(&CellScalar::Empty).unwrap(), JsonValue::Null);
    }

    #[test]
    fn widens_nested_arrays() {
        let value = CellScalar::Array(vec![
            CellScalar::Array(vec![CellScalar::Int(1), CellScalar::Float(2.0)]),
            CellScalar::Array(vec![CellScalar::Empty, CellScalar::Text("x".into())]),
        ]);
        assert_eq!(
            widen(&value).unwrap(),
            serde_json::json!([[1, 2.0], [null, "x"]])
        );
    }

    #[test]
    fn output_round_trips_through_serialization() {
        let values = vec![
            CellScalar::Int(-7),
            CellScalar::Float(3.125),
            CellScalar::Bool(true),
            CellScalar::Text("hello".to_string()),
            CellScalar::Empty,
        ];
        for value in values {
            let widened = widen(&value).unwrap();
            let text = serde_json::to_string(&widened).unwrap();
            let back: JsonValue = serde_json::from_str(&text).unwrap();
            assert_eq!(back, widened);
        }
    }
}
