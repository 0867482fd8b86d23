//! The normalized product shape produced by the pagination client.
//!
//! Upstream listing records arrive with heterogeneous field names and types
//! (numbers, numeric strings, absent fields). The listing layer normalizes
//! every record into this struct before it reaches any rendering code, so
//! callers never have to reason about raw upstream payloads.

use serde::{Deserialize, Serialize};

/// A product in the display currency, after currency normalization.
///
/// Invariant: `price` is a non-negative amount in the display currency when
/// conversion succeeded; when no usable exchange rate was attached to the
/// upstream response, it carries the raw upstream value unconverted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Upstream product identifier, stringified.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description (listing records reuse the display name).
    pub description: String,
    /// Unit price in the display currency.
    pub price: f64,
    /// Pre-discount price, when the upstream reported one.
    pub original_price: Option<f64>,
    /// Primary image URL.
    pub image: String,
    /// All image URLs (listing records carry only the primary image).
    pub images: Vec<String>,
    /// Category the product was fetched under, if any.
    pub category_id: Option<String>,
    /// Whether the product can currently be ordered.
    pub in_stock: bool,
    /// Review rating (upstream listings do not carry one; defaults apply).
    pub rating: f64,
    /// Review count.
    pub reviews: i64,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Units sold, when reported.
    pub sales_count: Option<i64>,
    /// Minimum order quantity, when reported.
    pub quantity_begin: Option<i64>,
}

impl Product {
    /// Line total for `quantity` units.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> f64 {
        self.price * f64::from(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: "42".to_string(),
            name: "Linen Shirt".to_string(),
            description: "Linen Shirt".to_string(),
            price: 19.99,
            original_price: Some(24.99),
            image: "https://img.example/42.jpg".to_string(),
            images: vec!["https://img.example/42.jpg".to_string()],
            category_id: Some("7".to_string()),
            in_stock: true,
            rating: 4.5,
            reviews: 120,
            tags: vec![],
            sales_count: Some(120),
            quantity_begin: Some(1),
        }
    }

    #[test]
    fn line_total_scales_with_quantity() {
        let product = sample();
        assert!((product.line_total(3) - 59.97).abs() < 1e-9);
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["original_price"], 24.99);
        assert_eq!(json["quantity_begin"], 1);
    }
}
