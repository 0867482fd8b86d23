//! Cart route handlers.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use lumina_core::{CartItem, CartTotals, Product};

use crate::error::Result;
use crate::state::AppState;

/// Variant chosen when the client sends none.
const DEFAULT_SIZE: &str = "One Size";
const DEFAULT_COLOR: &str = "Default";

/// Cart contents plus the money breakdown.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub count: u32,
    #[serde(flatten)]
    pub totals: CartTotals,
}

impl CartResponse {
    fn build(items: Vec<CartItem>) -> Self {
        let totals = CartTotals::from_subtotal_f64(lumina_core::subtotal(&items));
        Self {
            count: lumina_core::item_count(&items),
            items,
            totals,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product: Product,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub product_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// `GET /cart`
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    Ok(Json(CartResponse::build(state.cart().items()?)))
}

/// `GET /cart/count`
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(json!({ "count": state.cart().count()? })))
}

/// `POST /cart/add`
#[instrument(skip(state, request))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartResponse>> {
    let items = state.cart().add(
        request.product,
        request.quantity.unwrap_or(1).max(1),
        request.size.unwrap_or_else(|| DEFAULT_SIZE.to_string()),
        request.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
    )?;
    Ok(Json(CartResponse::build(items)))
}

/// `POST /cart/update`
#[instrument(skip(state, request))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<CartResponse>> {
    let items = state.cart().update_quantity(
        &request.product_id,
        request.size.as_deref().unwrap_or(DEFAULT_SIZE),
        request.color.as_deref().unwrap_or(DEFAULT_COLOR),
        request.quantity,
    )?;
    Ok(Json(CartResponse::build(items)))
}

/// `POST /cart/remove`
#[instrument(skip(state, request))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<CartResponse>> {
    let items = state.cart().remove(
        &request.product_id,
        request.size.as_deref().unwrap_or(DEFAULT_SIZE),
        request.color.as_deref().unwrap_or(DEFAULT_COLOR),
    )?;
    Ok(Json(CartResponse::build(items)))
}

/// `POST /cart/clear`
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartResponse>> {
    state.cart().clear()?;
    Ok(Json(CartResponse::build(Vec::new())))
}
