//! Cart money math.
//!
//! Totals are computed with decimal arithmetic so the storefront, checkout
//! summary, and order records all agree to the cent:
//!
//! ```text
//! total = subtotal + (subtotal > 50 ? 0 : 5.99) + subtotal * 0.10
//! ```

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, dec};
use serde::{Deserialize, Serialize};

/// Orders strictly above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = dec!(50);

/// Flat shipping charge below the free-shipping threshold.
pub const FLAT_SHIPPING: Decimal = dec!(5.99);

/// Tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = dec!(0.10);

/// Breakdown of a cart's cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CartTotals {
    /// Compute shipping, tax, and total from a subtotal.
    ///
    /// Every component is rescaled to two decimal places so serialized
    /// totals always read as money (`"60.00"`, never `"60"`).
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let mut subtotal = subtotal.round_dp(2);
        subtotal.rescale(2);

        let mut shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        shipping.rescale(2);

        let mut tax = (subtotal * TAX_RATE).round_dp(2);
        tax.rescale(2);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Compute totals from an f64 subtotal (normalized product prices are
    /// f64). Rounded to cents before the formula is applied.
    #[must_use]
    pub fn from_subtotal_f64(subtotal: f64) -> Self {
        let subtotal = Decimal::from_f64(subtotal)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2);
        Self::from_subtotal(subtotal)
    }
}
