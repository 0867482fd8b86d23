//! Upstream commerce API client.
//!
//! # Architecture
//!
//! - The upstream backend owns the catalog, pricing, inventory, and search;
//!   this module is the only place that talks to it.
//! - Responses are duck-typed JSON; envelopes are parsed loosely and unknown
//!   fields are preserved so the proxy routes can echo them back.
//! - In-memory caching via `moka` for the category tree and product details
//!   (5 minute TTL). Listing and search responses are never cached.
//! - No retries, no timeouts: a failed call surfaces immediately, a slow
//!   upstream call blocks only its own request.
//!
//! # Endpoints
//!
//! - `GET /v2_0_0-products/get-product-main-info` - paged listing
//! - `GET /v2_0_0-category/tree` - category tree
//! - `GET /v2_0_0-search/search` - keyword search
//! - `POST /v2_0_0-products/get-product-details-with-variants` - detail

mod client;
mod detail;
pub mod types;

pub use client::UpstreamClient;
pub use detail::{ProductDetail, ProductVariant};

use thiserror::Error;

/// Errors that can occur when interacting with the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success HTTP status.
    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}
