//! Restaurant existence guard.
//!
//! Routes nested under `/restaurants/:restaurant_id` run behind this middleware. It
//! rejects the request before the handler runs when the id is blank (400) or no
//! restaurant hash exists under it (404). On success the parsed `RestaurantId` is placed
//! in the request extensions for the handler.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use tastebook_core::{IdError, RestaurantId};

use crate::error::ApiError;
use crate::state::AppState;

/// Path parameter carrying the restaurant id.
pub const RESTAURANT_ID_PARAM: &str = "restaurant_id";

/// Reject requests that reference a missing restaurant.
pub async fn require_restaurant(
    State(state): State<Arc<AppState>>,
    Path(params): Path<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = params
        .get(RESTAURANT_ID_PARAM)
        .map(String::as_str)
        .unwrap_or_default();

    let restaurant_id: RestaurantId = match raw.parse() {
        Ok(id) => id,
        Err(IdError::Empty) => {
            return Err(ApiError::BadRequest("Restaurant ID not found".into()));
        }
        // Ids holding the key delimiter can never have been stored.
        Err(IdError::ContainsDelimiter) => {
            return Err(ApiError::NotFound("Restaurant not found".into()));
        }
    };

    let store = state.kv().await?;
    if !store.exists(&state.keys.restaurant(&restaurant_id)).await? {
        tracing::debug!(restaurant_id = %restaurant_id, "Restaurant not found");
        return Err(ApiError::NotFound("Restaurant not found".into()));
    }

    request.extensions_mut().insert(restaurant_id);
    Ok(next.run(request).await)
}
