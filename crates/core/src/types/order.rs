//! Orders and shipping addresses.
//!
//! Orders are created at checkout from the cart snapshot and persisted to
//! the per-browser state store; there is no server-side order system behind
//! them. Lifecycle is entirely client-driven: created on user action,
//! mutated in place, never independently expired.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// Order fulfillment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// Shipping address captured at checkout. No validation beyond presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// `ORD-` followed by nine uppercase alphanumerics.
    pub id: String,
    pub user_id: String,
    pub items: Vec<CartItem>,
    /// Grand total (subtotal + shipping + tax) at the time of checkout.
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Move the order to a new status and touch `updated_at`.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn order() -> Order {
        Order {
            id: "ORD-ABC123XYZ".to_string(),
            user_id: "u-1".to_string(),
            items: vec![],
            total: dec!(49.99),
            status: OrderStatus::Pending,
            shipping_address: Address {
                full_name: "Jo Doe".to_string(),
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62701".to_string(),
                country: "US".to_string(),
                phone: "555-0100".to_string(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(OrderStatus::Shipped).expect("serialize");
        assert_eq!(json, "shipped");
    }

    #[test]
    fn set_status_touches_updated_at() {
        let mut order = order();
        let before = order.updated_at;
        order.set_status(OrderStatus::Processing);
        assert_eq!(order.status, OrderStatus::Processing);
        assert!(order.updated_at >= before);
    }
}
