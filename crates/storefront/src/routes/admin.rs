//! Admin panel handlers.
//!
//! A thin JSON surface over the same services the storefront uses. Every
//! handler requires a signed-in user with the admin role; there is no
//! separate admin credential.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::instrument;

use lumina_core::{Order, OrderStatus, User};

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// `GET /admin/orders` - every order on record.
#[instrument(skip(state))]
pub async fn orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    require_admin(&state)?;
    Ok(Json(state.orders().all()?))
}

/// `GET /admin/customers` - every registered user, hashes excluded.
#[instrument(skip(state))]
pub async fn customers(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    require_admin(&state)?;
    Ok(Json(state.auth().users()?))
}

/// `POST /admin/orders/{id}/status`
#[instrument(skip(state))]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Order>> {
    require_admin(&state)?;
    state
        .orders()
        .update_status(&id, request.status)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

fn require_admin(state: &AppState) -> Result<User> {
    let user = state
        .auth()
        .current_user()?
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if user.is_admin() {
        Ok(user)
    } else {
        Err(AppError::Unauthorized("Admin access required".to_string()))
    }
}
