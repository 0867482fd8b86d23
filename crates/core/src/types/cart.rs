//! Cart line items.

use serde::{Deserialize, Serialize};

use super::product::Product;

/// One line in the cart: a product snapshot plus the chosen variant.
///
/// Two lines are the same entry when product id, size, and color all match;
/// adding an existing entry bumps its quantity instead of appending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub size: String,
    pub color: String,
}

impl CartItem {
    /// Whether this line matches the given variant key.
    #[must_use]
    pub fn matches(&self, product_id: &str, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.size == size && self.color == color
    }

    /// Line total in the display currency.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.line_total(self.quantity)
    }
}

/// Subtotal across all lines.
#[must_use]
pub fn subtotal(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

/// Total unit count across all lines.
#[must_use]
pub fn item_count(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: u32) -> CartItem {
        CartItem {
            product: Product {
                id: id.to_string(),
                name: id.to_string(),
                description: id.to_string(),
                price,
                original_price: None,
                image: String::new(),
                images: vec![],
                category_id: None,
                in_stock: true,
                rating: 4.5,
                reviews: 0,
                tags: vec![],
                sales_count: None,
                quantity_begin: None,
            },
            quantity,
            size: "One Size".to_string(),
            color: "Default".to_string(),
        }
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let items = vec![item("a", 10.0, 2), item("b", 5.0, 4)];
        assert!((subtotal(&items) - 40.0).abs() < 1e-9);
        assert_eq!(item_count(&items), 6);
    }

    #[test]
    fn matches_requires_all_three_keys() {
        let line = item("a", 10.0, 1);
        assert!(line.matches("a", "One Size", "Default"));
        assert!(!line.matches("a", "L", "Default"));
        assert!(!line.matches("b", "One Size", "Default"));
    }
}
