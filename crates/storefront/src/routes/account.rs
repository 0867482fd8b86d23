//! Account preference handlers.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

/// `GET /account/language`
#[instrument(skip(state))]
pub async fn language(State(state): State<AppState>) -> Result<Json<Value>> {
    Ok(Json(json!({ "language": state.prefs().language()? })))
}

/// `POST /account/language`
#[instrument(skip(state))]
pub async fn set_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<Value>> {
    let language = request.language.trim();
    if language.is_empty() {
        return Err(AppError::BadRequest("Language is required".to_string()));
    }

    state.prefs().set_language(language)?;
    Ok(Json(json!({ "language": language })))
}
