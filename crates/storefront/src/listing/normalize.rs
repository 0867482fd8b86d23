//! Normalization of raw upstream listing records into [`Product`]s.
//!
//! The upstream listing is duck-typed JSON. Price fields follow a
//! three-tier preference: a pre-converted `*_usd` field when present, then
//! the raw field converted with the response's exchange rate, then the raw
//! numeric value as-is. A record therefore always carries some usable
//! price, even when conversion silently fails for it.

use serde_json::Value;

use lumina_core::Product;

use crate::currency::ExchangeRate;
use crate::numeric::{self, Numeric};
use crate::upstream::types::JsonMap;

/// Rating shown when the upstream reports none.
const DEFAULT_RATING: f64 = 4.5;

/// Normalize one raw listing record.
#[must_use]
pub fn normalize_record(record: &JsonMap, rate: Option<&ExchangeRate>) -> Product {
    let images = string_array(record, "images");
    let image = string_field(record, "main_image")
        .or_else(|| string_field(record, "image"))
        .or_else(|| images.first().cloned())
        .unwrap_or_default();

    let quantity_begin = int_field(record, "quantity_begin");
    let sales_count = int_field(record, "sales_count");

    Product {
        id: id_field(record),
        name: string_field(record, "display_name")
            .or_else(|| string_field(record, "title"))
            .or_else(|| string_field(record, "name"))
            .unwrap_or_default(),
        description: string_field(record, "description").unwrap_or_default(),
        price: tiered_price(record, "product_price_usd", &["product_price", "price"], rate)
            .unwrap_or(0.0),
        original_price: tiered_price(
            record,
            "original_price_usd",
            &["original_price", "originalPrice"],
            rate,
        ),
        image,
        images,
        category_id: id_like(record.get("category_id")),
        // A missing quantity is treated as available rather than sold out.
        in_stock: quantity_begin.is_none_or(|q| q > 0),
        rating: numeric::field(record, "rating")
            .as_f64()
            .unwrap_or(DEFAULT_RATING),
        reviews: int_field(record, "reviews").or(sales_count).unwrap_or(0),
        tags: string_array(record, "tags"),
        sales_count,
        quantity_begin,
    }
}

/// Three-tier price resolution: pre-converted field, converted raw field,
/// raw value unconverted.
fn tiered_price(
    record: &JsonMap,
    converted_key: &str,
    raw_keys: &[&str],
    rate: Option<&ExchangeRate>,
) -> Option<f64> {
    if let Some(value) = numeric::field(record, converted_key).as_f64() {
        return Some(value);
    }

    let raw = raw_keys
        .iter()
        .map(|key| numeric::field(record, key))
        .find(Numeric::is_present)?;
    rate.and_then(|rate| rate.convert(&raw)).or(raw.as_f64())
}

/// Record identifier: `id` falling back to `product_id`, numbers
/// stringified.
fn id_field(record: &JsonMap) -> String {
    id_like(record.get("id"))
        .or_else(|| id_like(record.get("product_id")))
        .unwrap_or_default()
}

fn id_like(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(record: &JsonMap, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn string_array(record: &JsonMap, key: &str) -> Vec<String> {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn int_field(record: &JsonMap, key: &str) -> Option<i64> {
    match numeric::field(record, key) {
        Numeric::Number(v) | Numeric::NumericString(v) => Some(v as i64),
        Numeric::Absent | Numeric::NonNumeric => None,
    }
}
