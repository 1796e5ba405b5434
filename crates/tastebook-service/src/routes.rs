//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::handlers::{health, restaurants, reviews};
use crate::state::AppState;

/// Maximum concurrent requests for restaurant endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 256;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Restaurants
/// - `POST /restaurants` - Create a restaurant
/// - `GET /restaurants/:restaurant_id` - Fetch a restaurant and count the view
///
/// ## Reviews
/// - `POST /restaurants/:restaurant_id` - Add a review
/// - `GET /restaurants/:restaurant_id/reviews` - List reviews (`?page=&limit=`)
/// - `DELETE /restaurants/:restaurant_id/reviews/:review_id` - Delete a review
///
/// Every route under `/restaurants/:restaurant_id` runs behind the existence guard.
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let guarded_routes = Router::new()
        .route(
            "/restaurants/:restaurant_id",
            get(restaurants::get_restaurant).post(reviews::add_review),
        )
        .route(
            "/restaurants/:restaurant_id/reviews",
            get(reviews::list_reviews),
        )
        .route(
            "/restaurants/:restaurant_id/reviews/:review_id",
            delete(reviews::delete_review),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            guard::require_restaurant,
        ));

    let api_routes = Router::new()
        .route("/restaurants", post(restaurants::create_restaurant))
        .merge(guarded_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no concurrency limit)
        .route("/health", get(health::health))
        .merge(api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
