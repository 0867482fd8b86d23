//! Image proxy handler.
//!
//! Upstream product images live on CDNs that reject cross-origin browser
//! fetches, so the storefront streams them through its own origin.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Proxied images are immutable; let browsers cache them for a year.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub url: Option<String>,
}

/// `GET /api/image-proxy?url=` - stream an external image through this
/// origin, passing the content type along.
#[instrument(skip(state))]
pub async fn fetch(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Response> {
    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::BadRequest("Image url is required".to_string()))?;

    // Only plain web URLs may be proxied.
    let parsed = url::Url::parse(url)
        .map_err(|_| AppError::BadRequest("Invalid image url".to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::BadRequest("Invalid image url".to_string()));
    }

    let upstream_response = state.upstream().fetch_image(url).await?;
    let content_type = upstream_response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let body = Body::from_stream(upstream_response.bytes_stream());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL))
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}
