//! Restaurant handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Extension;

use tastebook_core::restaurant::VIEW_COUNT_FIELD;
use tastebook_core::{HashRecord, NewRestaurant, Restaurant, RestaurantId};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::response::Envelope;
use crate::state::AppState;

/// Create a restaurant.
pub async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<NewRestaurant>,
) -> Result<Envelope<Restaurant>, ApiError> {
    let store = state.kv().await?;
    let restaurant = Restaurant::new(body);

    let added = store
        .hset(&state.keys.restaurant(&restaurant.id), &restaurant.to_fields())
        .await?;

    tracing::info!(
        restaurant_id = %restaurant.id,
        fields = added,
        "Restaurant created"
    );

    Ok(Envelope::with_message(restaurant, "Added new restaurant"))
}

/// Fetch a restaurant, counting the view.
///
/// The increment and the read are issued together. The response carries the record as
/// read, which under concurrent traffic may not include every other request's increment.
pub async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    Extension(restaurant_id): Extension<RestaurantId>,
) -> Result<Envelope<Restaurant>, ApiError> {
    let store = state.kv().await?;
    let key = state.keys.restaurant(&restaurant_id);

    let (view_count, fields) = tokio::try_join!(
        store.hincrby(&key, VIEW_COUNT_FIELD, 1),
        store.hgetall(&key)
    )?;

    tracing::debug!(restaurant_id = %restaurant_id, view_count, "Restaurant viewed");

    Ok(Envelope::ok(Restaurant::from_fields(&fields)?))
}
