//! Checkout and order route handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::{info, instrument};

use lumina_core::{Address, Order};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// User id recorded on orders placed without a session.
const GUEST_USER_ID: &str = "guest";

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub shipping_address: Address,
}

/// `POST /checkout` - place an order from the current cart.
///
/// Requires a non-empty cart. The total is computed server-side from the
/// cart snapshot, never taken from the client; on success the cart is
/// cleared and the created order returned.
#[instrument(skip(state, request))]
pub async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<Order>> {
    let items = state.cart().items()?;
    if items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let totals = state.cart().totals()?;
    let user_id = state
        .auth()
        .current_user()?
        .map_or_else(|| GUEST_USER_ID.to_string(), |user| user.id);

    let order = state
        .orders()
        .place_order(&user_id, items, totals.total, request.shipping_address)?;
    state.cart().clear()?;

    info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok(Json(order))
}

/// `GET /orders` - order history, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.orders().all()?))
}

/// `GET /orders/{id}`
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    state
        .orders()
        .get(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}
