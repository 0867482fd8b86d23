//! Core types for Lumina.
//!
//! This module provides the normalized domain model shared across the
//! storefront: products as seen after currency normalization, the
//! three-level category tree, and the cart/order/user records persisted
//! to the per-browser state store.

pub mod cart;
pub mod category;
pub mod money;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, item_count, subtotal};
pub use category::{
    Category, CategoryNode, SubCategory, SubSubCategory, all_paths, find_by_path, slugify,
};
pub use money::{CartTotals, FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, TAX_RATE};
pub use order::{Address, Order, OrderStatus};
pub use product::Product;
pub use user::{Role, User};
