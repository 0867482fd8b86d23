//! Numeric parsing at the upstream boundary.
//!
//! Upstream payloads are duck-typed: the same field may arrive as a JSON
//! number, a numeric string, or be absent entirely, and which shape you get
//! varies by endpoint. Everything price-like is classified exactly once,
//! here, so the conversion and normalization code can match on a tagged
//! union instead of re-probing `serde_json::Value` shapes.

use serde_json::Value;

/// Classified numeric field from an upstream payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    /// A JSON number.
    Number(f64),
    /// A string that parses as a number (e.g. `"12.50"`).
    NumericString(f64),
    /// The field was missing or JSON null.
    Absent,
    /// Present but neither a number nor a numeric string.
    NonNumeric,
}

impl Numeric {
    /// Classify an optional JSON value.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Number(n)) => n.as_f64().map_or(Self::NonNumeric, Self::Number),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_or(Self::NonNumeric, Self::NumericString),
            Some(_) => Self::NonNumeric,
        }
    }

    /// The numeric value, if the field carried one.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) | Self::NumericString(v) => Some(*v),
            Self::Absent | Self::NonNumeric => None,
        }
    }

    /// Whether the field was present in any shape.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Classify `map[key]` in one step.
#[must_use]
pub fn field(map: &serde_json::Map<String, Value>, key: &str) -> Numeric {
    Numeric::from_value(map.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_numbers() {
        assert_eq!(Numeric::from_value(Some(&json!(12.5))), Numeric::Number(12.5));
        assert_eq!(Numeric::from_value(Some(&json!(0))), Numeric::Number(0.0));
    }

    #[test]
    fn classifies_numeric_strings() {
        assert_eq!(
            Numeric::from_value(Some(&json!("19.99"))),
            Numeric::NumericString(19.99)
        );
        assert_eq!(
            Numeric::from_value(Some(&json!(" 7 "))),
            Numeric::NumericString(7.0)
        );
    }

    #[test]
    fn classifies_absent_and_garbage() {
        assert_eq!(Numeric::from_value(None), Numeric::Absent);
        assert_eq!(Numeric::from_value(Some(&Value::Null)), Numeric::Absent);
        assert_eq!(Numeric::from_value(Some(&json!("abc"))), Numeric::NonNumeric);
        assert_eq!(Numeric::from_value(Some(&json!([1]))), Numeric::NonNumeric);
        assert_eq!(Numeric::from_value(Some(&json!({}))), Numeric::NonNumeric);
    }

    #[test]
    fn field_reads_from_a_map() {
        let Value::Object(map) = json!({ "price": "3.5" }) else {
            panic!("expected object")
        };
        assert_eq!(field(&map, "price"), Numeric::NumericString(3.5));
        assert_eq!(field(&map, "missing"), Numeric::Absent);
    }
}
