//! Exchange-rate extraction and price conversion.
//!
//! Each upstream response may attach a single multiplicative exchange rate
//! that applies uniformly to every price-like field in that response. A
//! rate is only ever applied when it is a finite positive number; anything
//! else (zero, negative, NaN, a non-numeric value, or no rate at all)
//! leaves prices passing through unconverted. That degradation is by
//! contract, not an error.

use serde_json::{Map, Value};

use crate::numeric::Numeric;

/// An exchange rate attached to one upstream response.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    /// Multiplicative source-to-target factor.
    pub rate: f64,
    /// ISO code of the upstream (source) currency, when reported.
    pub from_code: Option<String>,
    /// ISO code of the display (target) currency, when reported.
    pub to_code: Option<String>,
}

impl ExchangeRate {
    /// Extract the rate object from a response envelope's `exchange_rate`
    /// field. Returns `None` when the field is missing or carries no
    /// numeric `rate`.
    #[must_use]
    pub fn from_envelope(exchange_rate: Option<&Value>) -> Option<Self> {
        let obj = exchange_rate?.as_object()?;
        let rate = Numeric::from_value(obj.get("rate")).as_f64()?;

        Some(Self {
            rate,
            from_code: string_field(obj, "from_currency_code"),
            to_code: string_field(obj, "to_currency_code"),
        })
    }

    /// Whether this rate may be applied: finite and strictly positive.
    #[must_use]
    pub fn usable(&self) -> bool {
        self.rate.is_finite() && self.rate > 0.0
    }

    /// Display currency code, defaulting to USD.
    #[must_use]
    pub fn target_code(&self) -> &str {
        self.to_code.as_deref().unwrap_or("USD")
    }

    /// Convert a classified numeric field, rounding to two decimal places.
    ///
    /// Returns `None` when the rate is unusable or the field carried no
    /// number, in which case callers keep the raw value.
    #[must_use]
    pub fn convert(&self, value: &Numeric) -> Option<f64> {
        if !self.usable() {
            return None;
        }
        value.as_f64().map(|v| round2(v * self.rate))
    }

    /// Convert a raw JSON value in place, keeping the original on failure.
    /// String inputs convert to a string, numeric inputs to a number,
    /// mirroring how the field arrived.
    #[must_use]
    pub fn convert_value(&self, value: &Value) -> Value {
        let numeric = Numeric::from_value(Some(value));
        match (self.convert(&numeric), &numeric) {
            (Some(converted), Numeric::NumericString(_)) => {
                Value::String(format!("{converted:.2}"))
            }
            (Some(converted), _) => json_number(converted),
            _ => value.clone(),
        }
    }
}

/// Round to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Build a JSON number, falling back to null for non-finite input.
/// (Unreachable with a usable rate, but `Value::from` would panic-free
/// produce null anyway; keep it explicit.)
fn json_number(value: f64) -> Value {
    serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
}
