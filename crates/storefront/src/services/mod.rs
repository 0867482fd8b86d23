//! Domain services over the state store.
//!
//! Each service owns one snapshot key: the cart, the order history, the
//! account records, or the language preference. Mutations go through the
//! service, which persists the full snapshot on every change.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod prefs;

pub use auth::{ArgonVerifier, AuthService, CredentialVerifier};
pub use cart::CartService;
pub use orders::OrderService;
pub use prefs::PreferenceService;
