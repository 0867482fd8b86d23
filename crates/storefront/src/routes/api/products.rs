//! Product listing and detail proxy handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::currency::ExchangeRate;
use crate::error::Result;
use crate::numeric;
use crate::state::AppState;
use crate::upstream::ProductDetail;
use crate::upstream::types::{JsonMap, ListingEnvelope};

/// Raw price keys checked, in order, for the converted `*_usd` companions.
const PRICE_KEYS: [&str; 2] = ["product_price", "price"];
const ORIGINAL_PRICE_KEYS: [&str; 2] = ["original_price", "originalPrice"];

/// Records per listing page when the caller does not say. The search
/// endpoint defaults to 20; listings are smaller.
const DEFAULT_LIMIT: u32 = 12;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category_id: Option<String>,
}

/// `GET /api/products` - proxy one listing page, adding `product_price_usd`
/// and `original_price_usd` alongside the raw fields when the response
/// carries a usable exchange rate, and reporting the display currency once
/// at the envelope level. The raw fields and everything else in the
/// envelope pass through untouched.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingEnvelope>> {
    let envelope = state
        .upstream()
        .product_page(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(DEFAULT_LIMIT),
            query.category_id.as_deref(),
        )
        .await?;

    Ok(Json(convert_listing(envelope)))
}

/// `GET /api/products/{id}` - normalized product detail with variants.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>> {
    let detail = state.upstream().product_detail(&id).await?;
    Ok(Json(detail.as_ref().clone()))
}

/// Add converted price fields to every record of a listing envelope and
/// report the display currency at the envelope level.
///
/// Without a usable rate the records are returned unchanged; they keep
/// their raw prices and no `*_usd` fields appear. The `currency` field is
/// set either way.
#[must_use]
pub fn convert_listing(mut envelope: ListingEnvelope) -> ListingEnvelope {
    let rate =
        ExchangeRate::from_envelope(envelope.exchange_rate.as_ref()).filter(ExchangeRate::usable);

    let currency = rate.as_ref().map_or("USD", ExchangeRate::target_code);
    envelope
        .extra
        .insert("currency".to_string(), Value::String(currency.to_string()));

    if let Some(rate) = rate {
        for record in &mut envelope.data {
            convert_record(record, &rate);
        }
    }
    envelope
}

fn convert_record(record: &mut JsonMap, rate: &ExchangeRate) {
    add_converted_field(record, &PRICE_KEYS, "product_price_usd", rate);
    add_converted_field(record, &ORIGINAL_PRICE_KEYS, "original_price_usd", rate);
}

fn add_converted_field(record: &mut JsonMap, raw_keys: &[&str], usd_key: &str, rate: &ExchangeRate) {
    let raw = raw_keys
        .iter()
        .map(|key| numeric::field(record, key))
        .find(numeric::Numeric::is_present);

    if let Some(raw) = raw
        && let Some(converted) = rate.convert(&raw)
        && let Some(number) = serde_json::Number::from_f64(converted)
    {
        record.insert(usd_key.to_string(), Value::Number(number));
    }
}
