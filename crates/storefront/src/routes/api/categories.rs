//! Category tree handler.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tracing::{instrument, warn};

use crate::categories::fallback_tree;
use crate::state::AppState;

/// `GET /api/categories` - the transformed category tree.
///
/// An upstream failure or an empty tree falls back to the hardcoded tree
/// rather than surfacing an error: navigation must keep working when the
/// upstream is down, so this handler never fails.
#[instrument(skip(state))]
pub async fn tree(State(state): State<AppState>) -> Json<Value> {
    let categories = match state.upstream().categories().await {
        Ok(categories) if !categories.is_empty() => categories.as_ref().clone(),
        Ok(_) => {
            warn!("Upstream category tree is empty, serving fallback");
            fallback_tree()
        }
        Err(e) => {
            warn!(error = %e, "Upstream category tree unavailable, serving fallback");
            fallback_tree()
        }
    };

    Json(json!({ "success": true, "data": categories }))
}
