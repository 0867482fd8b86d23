//! Loose envelope types for upstream responses.
//!
//! The upstream API does not publish a schema and its field shapes drift
//! between endpoints, so these types pin down only what the proxy layer
//! needs and carry everything else through `#[serde(flatten)]` maps.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON object as it arrived from the upstream.
pub type JsonMap = serde_json::Map<String, Value>;

/// Envelope of `GET /v2_0_0-products/get-product-main-info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingEnvelope {
    /// Product records; each kept as a raw object so the currency layer can
    /// add converted fields alongside whatever the upstream sent.
    #[serde(default)]
    pub data: Vec<JsonMap>,
    /// Exchange-rate object, passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Upstream-reported pagination block. Everything is optional; totals are
/// best-effort.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev_page: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Envelope of `GET /v2_0_0-category/tree`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryTreeEnvelope {
    #[serde(default)]
    pub tree: Vec<CategoryTreeNode>,
}

/// One node of the upstream category tree. Levels 0/1/2 map to
/// category/subcategory/sub-subcategory; deeper levels are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryTreeNode {
    pub id: i64,
    pub category_name: String,
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub children: Vec<CategoryTreeNode>,
}

/// Envelope of `POST /v2_0_0-products/get-product-details-with-variants`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailEnvelope {
    #[serde(default)]
    pub success: bool,
    /// Product info object; nested `raw_data`/`images`/`product_props` may
    /// arrive as JSON-encoded strings.
    #[serde(default)]
    pub info: Option<JsonMap>,
    #[serde(default)]
    pub variants: Vec<JsonMap>,
    #[serde(default)]
    pub exchange_rate: Option<Value>,
}
