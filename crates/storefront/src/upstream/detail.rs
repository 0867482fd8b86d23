//! Product-detail normalization.
//!
//! The detail endpoint is the messiest upstream surface: `info.raw_data`,
//! `info.images`, and `info.product_props` may each arrive either as JSON
//! values or as JSON-encoded *strings*, and every price is a decimal string
//! in the source currency. Normalization parses the nested fields with a
//! per-field fallback to empty (a bad field never fails the response) and
//! applies the attached exchange rate to every price-like field, swapping
//! the reported currency to the target code.

use serde::Serialize;
use serde_json::Value;

use super::types::{DetailEnvelope, JsonMap};
use super::UpstreamError;
use crate::currency::ExchangeRate;
use crate::numeric::Numeric;

/// Price-like fields on the `info` object, converted in place.
const INFO_PRICE_FIELDS: &[&str] = &[
    "origin_price",
    "origin_price_min",
    "origin_price_max",
    "previous_origin_price",
    "discount_price",
    "delivery_fee",
];

/// Price-like fields on `raw_data.price_info`.
const PRICE_INFO_FIELDS: &[&str] = &[
    "price",
    "price_min",
    "price_max",
    "origin_price_min",
    "origin_price_max",
    "discount_price",
];

/// A purchasable variant of a product.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductVariant {
    pub sku_id: String,
    pub variant_name: String,
    pub props_names: String,
    pub origin_price: Option<String>,
    pub sale_price: Option<String>,
    pub previous_origin_price: Option<String>,
    pub stock: i64,
    pub sale_count: i64,
    pub variant_image: String,
}

/// Normalized product detail in the display currency.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub product_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Display currency after conversion (target code when a rate applied).
    pub currency: Option<String>,
    /// Source currency, recorded only when a conversion happened.
    pub original_currency: Option<String>,
    pub origin_price: Option<String>,
    pub origin_price_min: Option<String>,
    pub origin_price_max: Option<String>,
    pub previous_origin_price: Option<String>,
    pub discount_price: Option<String>,
    pub delivery_fee: Option<String>,
    pub sale_count: i64,
    pub total_stock: i64,
    pub is_sold_out: bool,
    pub images: Vec<String>,
    pub product_props: Vec<JsonMap>,
    /// The parsed `raw_data` blob with its price fields converted.
    pub raw_data: JsonMap,
    pub variants: Vec<ProductVariant>,
    /// Exchange-rate object echoed from the upstream response.
    pub exchange_rate: Option<Value>,
}

/// Normalize a detail envelope.
///
/// # Errors
///
/// Returns `NotFound` when the upstream reports failure or no `info` block.
pub fn normalize_detail(
    product_id: &str,
    envelope: DetailEnvelope,
) -> Result<ProductDetail, UpstreamError> {
    let Some(mut info) = envelope.info.filter(|_| envelope.success) else {
        return Err(UpstreamError::NotFound(format!("product {product_id}")));
    };

    let mut raw_data = parse_embedded_object(info.get("raw_data"));
    let mut images = parse_embedded_string_array(info.get("images"));
    let mut product_props = parse_embedded_object_array(info.get("product_props"));

    // The flat fields win; raw_data fills the gaps.
    if images.is_empty() {
        images = parse_embedded_string_array(raw_data.get("main_imgs"));
    }
    if product_props.is_empty() {
        product_props = parse_embedded_object_array(raw_data.get("product_props"));
    }

    let rate = ExchangeRate::from_envelope(envelope.exchange_rate.as_ref());
    let usable_rate = rate.as_ref().filter(|r| r.usable());

    let source_currency = string_field(&info, "currency");
    let mut currency = source_currency.clone();
    let mut original_currency = None;

    if let Some(rate) = usable_rate {
        for key in INFO_PRICE_FIELDS {
            convert_in_place(&mut info, key, rate);
        }
        convert_raw_data(&mut raw_data, rate);
        currency = Some(rate.target_code().to_string());
        original_currency = source_currency;
    }

    let variants = envelope
        .variants
        .iter()
        .map(|raw| normalize_variant(raw, usable_rate))
        .collect();

    Ok(ProductDetail {
        product_id: product_id.to_string(),
        title: string_field(&info, "title_en").or_else(|| string_field(&info, "title_zh")),
        description: string_field(&info, "description_en")
            .or_else(|| string_field(&info, "description_zh")),
        currency,
        original_currency,
        origin_price: price_field(&info, "origin_price"),
        origin_price_min: price_field(&info, "origin_price_min"),
        origin_price_max: price_field(&info, "origin_price_max"),
        previous_origin_price: price_field(&info, "previous_origin_price"),
        discount_price: price_field(&info, "discount_price"),
        delivery_fee: price_field(&info, "delivery_fee"),
        sale_count: int_field(&info, "sale_count"),
        total_stock: int_field(&info, "total_stock"),
        is_sold_out: int_field(&info, "is_sold_out") != 0,
        images,
        product_props,
        raw_data,
        variants,
        exchange_rate: envelope.exchange_rate,
    })
}

/// Convert the price-bearing corners of `raw_data` in place.
fn convert_raw_data(raw_data: &mut JsonMap, rate: &ExchangeRate) {
    if let Some(Value::Object(price_info)) = raw_data.get_mut("price_info") {
        for key in PRICE_INFO_FIELDS {
            convert_in_place(price_info, key, rate);
        }
    }

    if let Some(Value::Object(tiered)) = raw_data.get_mut("tiered_price_info")
        && let Some(Value::Array(prices)) = tiered.get_mut("prices")
    {
        for tier in prices {
            if let Value::Object(tier) = tier {
                convert_in_place(tier, "price", rate);
            }
        }
    }

    if let Some(Value::Object(delivery)) = raw_data.get_mut("delivery_info") {
        convert_in_place(delivery, "delivery_fee", rate);
    }

    raw_data.insert(
        "currency".to_string(),
        Value::String(rate.target_code().to_string()),
    );
}

fn normalize_variant(raw: &JsonMap, rate: Option<&ExchangeRate>) -> ProductVariant {
    let price = |key: &str| {
        let value = raw.get(key)?;
        if value.is_null() {
            return None;
        }
        Some(match rate {
            Some(rate) => value_to_price_string(&rate.convert_value(value)),
            None => value_to_price_string(value),
        })
    };

    ProductVariant {
        sku_id: string_field(raw, "sku_id").unwrap_or_default(),
        variant_name: string_field(raw, "variant_name").unwrap_or_default(),
        props_names: string_field(raw, "props_names").unwrap_or_default(),
        origin_price: price("origin_price"),
        sale_price: price("sale_price"),
        previous_origin_price: price("previous_origin_price"),
        stock: int_field(raw, "stock"),
        sale_count: int_field(raw, "sale_count"),
        variant_image: string_field(raw, "variant_image").unwrap_or_default(),
    }
}

// =============================================================================
// Embedded-JSON parsing (graceful fallback to empty)
// =============================================================================

/// Parse a field that should be a JSON object but may be a JSON-encoded
/// string. Unparseable input falls back to an empty map.
fn parse_embedded_object(value: Option<&Value>) -> JsonMap {
    match value {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                tracing::warn!("Failed to parse embedded raw_data JSON, using empty object");
                JsonMap::new()
            }
        },
        _ => JsonMap::new(),
    }
}

/// Parse a field that should be an array of strings but may be JSON-encoded.
fn parse_embedded_string_array(value: Option<&Value>) -> Vec<String> {
    let parsed = match value {
        Some(Value::Array(items)) => Some(Value::Array(items.clone())),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).ok(),
        _ => None,
    };

    match parsed {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Parse a field that should be an array of objects but may be JSON-encoded.
fn parse_embedded_object_array(value: Option<&Value>) -> Vec<JsonMap> {
    let parsed = match value {
        Some(Value::Array(items)) => Some(Value::Array(items.clone())),
        Some(Value::String(s)) => serde_json::from_str::<Value>(s).ok(),
        _ => None,
    };

    match parsed {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

// =============================================================================
// Field helpers
// =============================================================================

fn string_field(map: &JsonMap, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Read a price field as a string, whatever shape it arrived in.
fn price_field(map: &JsonMap, key: &str) -> Option<String> {
    let value = map.get(key)?;
    if value.is_null() {
        return None;
    }
    Some(value_to_price_string(value))
}

fn value_to_price_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn int_field(map: &JsonMap, key: &str) -> i64 {
    match Numeric::from_value(map.get(key)) {
        Numeric::Number(v) | Numeric::NumericString(v) => v as i64,
        Numeric::Absent | Numeric::NonNumeric => 0,
    }
}

/// Convert a price field in place, keeping the original value when the
/// field is absent or non-numeric.
fn convert_in_place(map: &mut JsonMap, key: &str, rate: &ExchangeRate) {
    if let Some(value) = map.get(key) {
        let converted = rate.convert_value(value);
        map.insert(key.to_string(), converted);
    }
}
