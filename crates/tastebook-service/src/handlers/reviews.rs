//! Review handlers.
//!
//! A review lives in two places: its id in the restaurant's review index and its fields
//! in a detail hash. Both are written and removed together but not atomically.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Extension;
use futures::future::try_join_all;
use serde::Deserialize;

use tastebook_core::{HashRecord, NewReview, Pagination, RestaurantId, Review, ReviewId};

use crate::error::ApiError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::response::Envelope;
use crate::state::AppState;

/// Add a review to a restaurant.
pub async fn add_review(
    State(state): State<Arc<AppState>>,
    Extension(restaurant_id): Extension<RestaurantId>,
    ValidatedJson(body): ValidatedJson<NewReview>,
) -> Result<Envelope<Review>, ApiError> {
    let store = state.kv().await?;
    let review = Review::new(restaurant_id, body);

    let index_key = state.keys.reviews(&review.restaurant_id);
    let details_key = state.keys.review_details(&review.id);
    let fields = review.to_fields();

    tokio::try_join!(
        store.lpush(&index_key, review.id.as_str()),
        store.hset(&details_key, &fields)
    )?;

    tracing::info!(
        restaurant_id = %review.restaurant_id,
        review_id = %review.id,
        "Review added"
    );

    Ok(Envelope::with_message(review, "Review Added"))
}

/// List a restaurant's reviews, newest first.
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Extension(restaurant_id): Extension<RestaurantId>,
    ValidatedQuery(page): ValidatedQuery<Pagination>,
) -> Result<Envelope<Vec<Review>>, ApiError> {
    let store = state.kv().await?;
    let (start, stop) = page.bounds_capped(state.config.max_page_size);

    let ids = store
        .lrange(&state.keys.reviews(&restaurant_id), start, stop)
        .await?;

    let lookups = ids.iter().filter_map(|raw| match raw.parse::<ReviewId>() {
        Ok(review_id) => {
            let key = state.keys.review_details(&review_id);
            let store = &store;
            Some(async move { store.hgetall(&key).await })
        }
        Err(e) => {
            tracing::warn!(
                restaurant_id = %restaurant_id,
                review_id = %raw,
                error = %e,
                "Skipping malformed review id"
            );
            None
        }
    });

    let mut reviews = Vec::with_capacity(ids.len());
    for fields in try_join_all(lookups).await? {
        // The index entry can outlive its detail hash after a partial delete.
        if fields.is_empty() {
            continue;
        }
        reviews.push(Review::from_fields(&fields)?);
    }

    Ok(Envelope::ok(reviews))
}

/// Path parameters of a single review.
#[derive(Debug, Deserialize)]
pub struct ReviewPath {
    /// The review id.
    pub review_id: String,
}

/// Delete a review from a restaurant.
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    Extension(restaurant_id): Extension<RestaurantId>,
    Path(path): Path<ReviewPath>,
) -> Result<Envelope<ReviewId>, ApiError> {
    let review_id: ReviewId = path
        .review_id
        .parse()
        .map_err(|_| ApiError::NotFound("Reviews not found".into()))?;

    let store = state.kv().await?;
    let index_key = state.keys.reviews(&restaurant_id);
    let details_key = state.keys.review_details(&review_id);

    let (removed, deleted) = tokio::try_join!(
        store.lrem(&index_key, 0, review_id.as_str()),
        store.del(&details_key)
    )?;

    if removed == 0 && deleted == 0 {
        return Err(ApiError::NotFound("Reviews not found".into()));
    }

    tracing::info!(
        restaurant_id = %restaurant_id,
        review_id = %review_id,
        removed,
        deleted,
        "Review deleted"
    );

    Ok(Envelope::with_message(review_id, "Review deleted"))
}
