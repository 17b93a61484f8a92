//! HTTP handlers and routes for the short-link service
//!
//! Four operations against the key-value store:
//! - `GET /{key}` - redirect to the stored target URL
//! - `POST /` - create a short link under a fresh random key
//! - `GET /` - list every short link as a JSON object
//! - `POST /c` - delete every short link

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::store::KvStore;

/// Application state shared across all short-link handlers
///
/// The store handle and the base URL are injected here rather than read
/// from ambient globals, so tests can run against a throwaway store.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe handle to the service's key-value store
    pub store: Arc<KvStore>,
    /// Base URL used to build absolute short links (e.g. "https://s.example.com")
    pub base_url: String,
}

/// Candidate short keys are drawn from this base-36 alphabet
const KEY_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a generated short key
pub const KEY_LEN: usize = 7;

/// Collision retry budget for create
///
/// With 36^7 possible keys a collision is already rare; eight straight
/// collisions means the store is effectively full, and create fails
/// with 503 instead of spinning.
const MAX_KEY_ATTEMPTS: usize = 8;

/// Generates a random 7-character base-36 key
fn generate_key() -> String {
    let mut rng = rand::rng();
    (0..KEY_LEN)
        .map(|_| KEY_ALPHABET[rng.random_range(0..KEY_ALPHABET.len())] as char)
        .collect()
}

/// Request payload for creating a short link
///
/// `url` is optional at the serde level so a missing field maps to the
/// documented 400 instead of a deserialization rejection.
#[derive(Deserialize)]
pub struct CreateRequest {
    /// The target URL to shorten (stored verbatim, not validated)
    #[serde(default)]
    pub url: Option<String>,
}

/// Response returned after successfully creating a short link
///
/// ```json
/// { "url": "https://s.example.com/abc1234" }
/// ```
#[derive(Serialize)]
pub struct CreateResponse {
    /// The absolute short URL for the new link
    pub url: String,
}

/// Redirects a short key to its stored target URL
///
/// Responds 302 Found with the stored value in the `Location` header,
/// or 404 if the key has no mapping. The stored value is passed through
/// as-is; nothing checks that it is a well-formed URL.
pub async fn resolve(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target = state.store.get(&key)?.ok_or(AppError::NotFound)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]).into_response())
}

/// Creates a short link under a freshly generated key
///
/// Rejects a missing or empty `url` with 400 before touching the store.
/// Key generation retries on collision up to `MAX_KEY_ATTEMPTS` times;
/// the check-and-insert is atomic per attempt, so an existing mapping is
/// never overwritten even under concurrent creates.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequest>,
) -> Result<Json<CreateResponse>, AppError> {
    let target = match payload.url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(AppError::BadRequest),
    };

    for attempt in 1..=MAX_KEY_ATTEMPTS {
        let key = generate_key();
        if state.store.put_if_absent(&key, &target)? {
            tracing::debug!(%key, %target, "short link created");
            return Ok(Json(CreateResponse {
                url: format!("{}/{}", state.base_url, key),
            }));
        }
        tracing::warn!(attempt, "short key collision, regenerating");
    }

    Err(AppError::KeySpaceExhausted)
}

/// Lists every short link as one JSON object
///
/// Property names are the absolute short URLs, values the stored
/// targets. Ordering follows store iteration and is not guaranteed.
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut links = Map::new();
    for (key, target) in state.store.entries()? {
        links.insert(format!("{}/{}", state.base_url, key), Value::String(target));
    }

    Ok(Json(Value::Object(links)))
}

/// Deletes every short link, unconditionally
pub async fn clear_all(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let removed = state.store.clear()?;
    tracing::debug!(removed, "cleared all short links");

    Ok("Cleared")
}

/// Creates the short-link service router
///
/// # Route Definitions
///
/// - `GET /{key}` - Redirects to the stored target URL
/// - `POST /` - Creates a new short link
/// - `GET /` - Lists all short links
/// - `POST /c` - Clears all short links
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_all).post(create))
        .route("/c", post(clear_all))
        .route("/{key}", get(resolve))
        .with_state(state)
}
