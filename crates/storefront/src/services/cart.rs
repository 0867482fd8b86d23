//! Cart service.

use std::sync::Arc;

use tracing::instrument;

use lumina_core::{CartItem, CartTotals, Product, item_count, subtotal};

use crate::store::{self, StateStore, StoreError, keys};

/// Cart operations over the snapshot store.
///
/// Lines merge on `(product id, size, color)`; a quantity update to zero
/// or below removes the line. The full cart snapshot is persisted on
/// every mutation.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn StateStore>,
}

impl CartService {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Current cart lines, empty if nothing was ever added.
    pub fn items(&self) -> Result<Vec<CartItem>, StoreError> {
        Ok(store::load_as(self.store.as_ref(), keys::CART)?.unwrap_or_default())
    }

    /// Add a product, merging with an existing line for the same variant.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(
        &self,
        product: Product,
        quantity: u32,
        size: String,
        color: String,
    ) -> Result<Vec<CartItem>, StoreError> {
        let mut items = self.items()?;

        if let Some(line) = items
            .iter_mut()
            .find(|line| line.matches(&product.id, &size, &color))
        {
            line.quantity += quantity;
        } else {
            items.push(CartItem {
                product,
                quantity,
                size,
                color,
            });
        }

        self.persist(&items)?;
        Ok(items)
    }

    /// Set a line's quantity. Zero or below removes the line; updating a
    /// line that does not exist is a no-op.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &self,
        product_id: &str,
        size: &str,
        color: &str,
        quantity: i64,
    ) -> Result<Vec<CartItem>, StoreError> {
        let mut items = self.items()?;

        if quantity <= 0 {
            items.retain(|line| !line.matches(product_id, size, color));
        } else if let Some(line) = items
            .iter_mut()
            .find(|line| line.matches(product_id, size, color))
        {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        self.persist(&items)?;
        Ok(items)
    }

    /// Remove one line.
    #[instrument(skip(self))]
    pub fn remove(
        &self,
        product_id: &str,
        size: &str,
        color: &str,
    ) -> Result<Vec<CartItem>, StoreError> {
        let mut items = self.items()?;
        items.retain(|line| !line.matches(product_id, size, color));
        self.persist(&items)?;
        Ok(items)
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), StoreError> {
        self.persist(&[])
    }

    /// Subtotal, shipping, tax, and grand total for the current cart.
    pub fn totals(&self) -> Result<CartTotals, StoreError> {
        Ok(CartTotals::from_subtotal_f64(subtotal(&self.items()?)))
    }

    /// Total unit count across all lines.
    pub fn count(&self) -> Result<u32, StoreError> {
        Ok(item_count(&self.items()?))
    }

    fn persist(&self, items: &[CartItem]) -> Result<(), StoreError> {
        store::persist_as(self.store.as_ref(), keys::CART, items)
    }
}
