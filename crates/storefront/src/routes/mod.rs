//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Upstream proxy API
//! GET  /api/products               - Product listing (currency-normalized)
//! GET  /api/products/{id}          - Product detail with variants
//! GET  /api/search                 - Keyword search (status mirrored)
//! GET  /api/categories             - Category tree (hardcoded fallback)
//! GET  /api/image-proxy            - Streamed external image fetch
//!
//! # Cart
//! GET  /cart                       - Cart items plus totals
//! GET  /cart/count                 - Total unit count
//! POST /cart/add                   - Add a product (merges variants)
//! POST /cart/update                - Set line quantity (<= 0 removes)
//! POST /cart/remove                - Remove a line
//! POST /cart/clear                 - Empty the cart
//!
//! # Checkout and orders
//! POST /checkout                   - Place an order from the cart
//! GET  /orders                     - Order history, newest first
//! GET  /orders/{id}                - One order (404 unknown)
//!
//! # Auth
//! POST /auth/signup                - Create an account and sign in
//! POST /auth/login                 - Verify credentials and sign in
//! POST /auth/logout                - Drop the session
//! GET  /auth/me                    - The signed-in user
//!
//! # Account
//! GET  /account/language           - Language preference
//! POST /account/language           - Set language preference
//!
//! # Admin (requires the admin role)
//! GET  /admin/orders               - All orders
//! GET  /admin/customers            - All registered users
//! POST /admin/orders/{id}/status   - Move an order to a new status
//! ```

pub mod account;
pub mod admin;
pub mod api;
pub mod auth;
pub mod cart;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the upstream proxy API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(api::products::list))
        .route("/products/{id}", get(api::products::detail))
        .route("/search", get(api::search::search))
        .route("/categories", get(api::categories::tree))
        .route("/image-proxy", get(api::image_proxy::fetch))
}

/// Create the cart router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the auth router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the account router.
pub fn account_routes() -> Router<AppState> {
    Router::new().route(
        "/language",
        get(account::language).post(account::set_language),
    )
}

/// Create the admin router. Every handler checks the admin role itself.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::orders))
        .route("/customers", get(admin::customers))
        .route("/orders/{id}/status", post(admin::update_order_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(orders::checkout))
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::show))
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .nest("/admin", admin_routes())
}
