//! Lumina storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod categories;
pub mod config;
pub mod currency;
pub mod error;
pub mod listing;
pub mod numeric;
pub mod routes;
pub mod scroll;
pub mod services;
pub mod state;
pub mod store;
pub mod upstream;
