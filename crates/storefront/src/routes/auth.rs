//! Auth route handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use lumina_core::User;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/signup`
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<User>> {
    let user = state
        .auth()
        .signup(&request.email, &request.name, &request.password)?;
    Ok(Json(user))
}

/// `POST /auth/login`
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>> {
    let user = state.auth().login(&request.email, &request.password)?;
    Ok(Json(user))
}

/// `POST /auth/logout`
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Json<Value>> {
    state.auth().logout()?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /auth/me` - the signed-in user, or `{"user": null}`.
#[instrument(skip(state))]
pub async fn me(State(state): State<AppState>) -> Result<Json<Value>> {
    let user = state.auth().current_user()?;
    Ok(Json(json!({ "user": user })))
}
