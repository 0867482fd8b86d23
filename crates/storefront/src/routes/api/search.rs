//! Keyword search proxy handler.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::listing::DEFAULT_PAGE_SIZE;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// `GET /api/search` - forward a keyword search and pass the envelope
/// through verbatim. A missing or whitespace-only keyword is a 400; a
/// non-success upstream status is mirrored back to the client.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>> {
    let keyword = query
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .ok_or_else(|| AppError::BadRequest("Search keyword is required".to_string()))?;

    let envelope = state
        .upstream()
        .search(
            keyword,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(Json(envelope))
}
