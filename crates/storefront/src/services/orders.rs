//! Order history service.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use rust_decimal::Decimal;
use tracing::instrument;

use lumina_core::{Address, CartItem, Order, OrderStatus};

use crate::store::{self, StateStore, StoreError, keys};

/// Order operations over the snapshot store. The history is kept newest
/// first and persisted in full on every change.
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn StateStore>,
}

impl OrderService {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Order history, newest first.
    pub fn all(&self) -> Result<Vec<Order>, StoreError> {
        Ok(store::load_as(self.store.as_ref(), keys::ORDERS)?.unwrap_or_default())
    }

    /// Look up one order by id.
    pub fn get(&self, order_id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.all()?.into_iter().find(|order| order.id == order_id))
    }

    /// Create a pending order from a cart snapshot and prepend it to the
    /// history.
    #[instrument(skip(self, items, shipping_address), fields(item_count = items.len()))]
    pub fn place_order(
        &self,
        user_id: &str,
        items: Vec<CartItem>,
        total: Decimal,
        shipping_address: Address,
    ) -> Result<Order, StoreError> {
        let now = Utc::now();
        let order = Order {
            id: generate_order_id(),
            user_id: user_id.to_string(),
            items,
            total,
            status: OrderStatus::Pending,
            shipping_address,
            created_at: now,
            updated_at: now,
        };

        let mut orders = self.all()?;
        orders.insert(0, order.clone());
        self.persist(&orders)?;
        Ok(order)
    }

    /// Move an order to a new status. Returns the updated order, or `None`
    /// when no order with that id exists.
    #[instrument(skip(self))]
    pub fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>, StoreError> {
        let mut orders = self.all()?;
        let Some(order) = orders.iter_mut().find(|order| order.id == order_id) else {
            return Ok(None);
        };

        order.set_status(status);
        let updated = order.clone();
        self.persist(&orders)?;
        Ok(Some(updated))
    }

    fn persist(&self, orders: &[Order]) -> Result<(), StoreError> {
        store::persist_as(self.store.as_ref(), keys::ORDERS, orders)
    }
}

/// `ORD-` followed by nine uppercase alphanumerics.
fn generate_order_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("ORD-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal::dec;

    fn service() -> OrderService {
        OrderService::new(Arc::new(MemoryStore::new()))
    }

    fn address() -> Address {
        Address {
            full_name: "Jo Doe".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "US".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn order_ids_have_the_expected_shape() {
        let id = generate_order_id();
        assert!(id.starts_with("ORD-"));
        let suffix = &id[4..];
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn history_is_newest_first() {
        let orders = service();
        let first = orders
            .place_order("u-1", vec![], dec!(10), address())
            .expect("place");
        let second = orders
            .place_order("u-1", vec![], dec!(20), address())
            .expect("place");

        let all = orders.all().expect("all");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn get_finds_by_id() {
        let orders = service();
        let placed = orders
            .place_order("u-1", vec![], dec!(49.99), address())
            .expect("place");

        let found = orders.get(&placed.id).expect("get").expect("present");
        assert_eq!(found.total, dec!(49.99));
        assert_eq!(found.status, OrderStatus::Pending);

        assert!(orders.get("ORD-MISSING00").expect("get").is_none());
    }

    #[test]
    fn update_status_touches_updated_at() {
        let orders = service();
        let placed = orders
            .place_order("u-1", vec![], dec!(10), address())
            .expect("place");

        let updated = orders
            .update_status(&placed.id, OrderStatus::Shipped)
            .expect("update")
            .expect("present");
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert!(updated.updated_at >= placed.updated_at);

        assert!(
            orders
                .update_status("ORD-MISSING00", OrderStatus::Shipped)
                .expect("update")
                .is_none()
        );
    }
}
