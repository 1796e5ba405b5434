//! Common test utilities for tastebook integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use tastebook_core::{RestaurantId, ReviewId};
use tastebook_service::{create_router, AppState, ServiceConfig};
use tastebook_store::{KeySpace, MemoryStore, StoreClient};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for inspecting what requests wrote.
    pub store: Arc<MemoryStore>,
    /// Key builder matching the server's namespace.
    pub keys: KeySpace,
}

impl TestHarness {
    /// Create a new test harness with an empty store.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Create a harness with a custom configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let keys = KeySpace::new(config.key_namespace.clone());

        let state = AppState::new(StoreClient::with_store(store.clone()), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            keys,
        }
    }

    /// Create a restaurant and return its id.
    pub async fn create_restaurant(&self, name: &str, location: &str) -> String {
        let response = self
            .server
            .post("/restaurants")
            .json(&json!({ "name": name, "location": location }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["data"]["id"]
            .as_str()
            .expect("restaurant id")
            .to_string()
    }

    /// Add a review and return its id.
    pub async fn add_review(&self, restaurant_id: &str, rating: f64, text: &str) -> String {
        let response = self
            .server
            .post(&format!("/restaurants/{restaurant_id}"))
            .json(&json!({ "rating": rating, "text": text }))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["data"]["id"].as_str().expect("review id").to_string()
    }

    /// List reviews with explicit paging and return the `data` array.
    pub async fn list_reviews(&self, restaurant_id: &str, page: u64, limit: u64) -> Vec<Value> {
        let response = self
            .server
            .get(&format!("/restaurants/{restaurant_id}/reviews"))
            .add_query_param("page", page)
            .add_query_param("limit", limit)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        body["data"].as_array().expect("review list").clone()
    }

    /// Key of a restaurant hash.
    pub fn restaurant_key(&self, id: &str) -> String {
        self.keys.restaurant(&id.parse::<RestaurantId>().unwrap())
    }

    /// Key of a restaurant's review index.
    pub fn reviews_key(&self, restaurant_id: &str) -> String {
        self.keys.reviews(&restaurant_id.parse::<RestaurantId>().unwrap())
    }

    /// Key of a review detail hash.
    pub fn review_details_key(&self, review_id: &str) -> String {
        self.keys.review_details(&review_id.parse::<ReviewId>().unwrap())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration used by the default harness.
pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        ..ServiceConfig::default()
    }
}
