//! HTTP handlers and routes for the single-slot clipboard service
//!
//! One text slot under a fixed key: `POST /` overwrites it with the raw
//! request body, `GET /` returns the current contents verbatim.

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::error::AppError;
use crate::store::KvStore;

/// Fixed store key for the single clipboard slot
pub const CLIP_KEY: &str = "clip";

/// Application state shared across the clipboard handlers
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe handle to the service's key-value store
    pub store: Arc<KvStore>,
}

/// Returns the current clipboard contents verbatim
///
/// A never-written slot responds 200 with an empty body; the store
/// keeps absence (`None`) distinct from an empty string, and both
/// deliberately collapse to the same empty response here.
pub async fn get_clip(State(state): State<AppState>) -> Result<String, AppError> {
    Ok(state.store.get(CLIP_KEY)?.unwrap_or_default())
}

/// Overwrites the clipboard slot with the raw request body
pub async fn set_clip(
    State(state): State<AppState>,
    body: String,
) -> Result<&'static str, AppError> {
    state.store.put(CLIP_KEY, &body)?;
    tracing::debug!(bytes = body.len(), "clipboard updated");

    Ok("ok")
}

/// Creates the clipboard service router
///
/// # Route Definitions
///
/// - `GET /` - Returns the current clipboard text (possibly empty)
/// - `POST /` - Replaces the clipboard text with the request body
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_clip).post(set_clip))
        .with_state(state)
}
