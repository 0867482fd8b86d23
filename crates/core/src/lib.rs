//! Lumina Core - Shared domain types library.
//!
//! This crate provides common types used across all Lumina components:
//! - `storefront` - Public-facing e-commerce site and upstream proxy
//! - `integration-tests` - End-to-end tests against a mock upstream
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, categories, cart items, orders, users, and the
//!   cart money math shared by the cart page and checkout.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
