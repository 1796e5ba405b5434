//! Review endpoint integration tests.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{json, Value};

use common::{test_config, TestHarness};
use tastebook_service::ServiceConfig;
use tastebook_store::KvStore;

async fn harness_with_restaurant() -> (TestHarness, String) {
    let harness = TestHarness::new();
    let id = harness.create_restaurant("Pizza Place", "Downtown").await;
    (harness, id)
}

fn texts(reviews: &[Value]) -> Vec<&str> {
    reviews
        .iter()
        .map(|r| r["text"].as_str().expect("text"))
        .collect()
}

// ============================================================================
// Add
// ============================================================================

#[tokio::test]
async fn add_review_returns_record() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    let before = Utc::now().timestamp_millis();

    let response = harness
        .server
        .post(&format!("/restaurants/{restaurant_id}"))
        .json(&json!({ "rating": 5, "text": "Great" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Review Added");

    let review = &body["data"];
    assert!(!review["id"].as_str().unwrap().is_empty());
    assert_eq!(review["restaurantId"], restaurant_id.as_str());
    assert_eq!(review["rating"].as_f64(), Some(5.0));
    assert_eq!(review["text"], "Great");

    let timestamp = review["timestamp"].as_i64().unwrap();
    assert!(timestamp >= before);
    assert!(timestamp <= Utc::now().timestamp_millis());
}

#[tokio::test]
async fn add_review_writes_index_and_detail() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let review_id = harness.add_review(&restaurant_id, 4.5, "Solid").await;

    let index = harness
        .store
        .lrange(&harness.reviews_key(&restaurant_id), 0, -1)
        .await
        .unwrap();
    assert_eq!(index, vec![review_id.clone()]);

    let fields = harness
        .store
        .hgetall(&harness.review_details_key(&review_id))
        .await
        .unwrap();
    assert_eq!(fields.get("rating").map(String::as_str), Some("4.5"));
    assert_eq!(
        fields.get("restaurantId").map(String::as_str),
        Some(restaurant_id.as_str())
    );
}

#[tokio::test]
async fn add_review_to_missing_restaurant_writes_nothing() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/restaurants/01HZZZZZZZZZZZZZZZZZZZZZZZ")
        .json(&json!({ "rating": 5, "text": "Great" }))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "Restaurant not found");
    assert!(harness.store.is_empty().await);
}

#[tokio::test]
async fn add_review_ignores_extra_body_fields() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .post(&format!("/restaurants/{restaurant_id}"))
        .json(&json!({ "rating": 4, "text": "Good", "author": "anon" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"].get("author").is_none());

    let review_id = body["data"]["id"].as_str().unwrap();
    let fields = harness
        .store
        .hgetall(&harness.review_details_key(review_id))
        .await
        .unwrap();
    assert!(!fields.contains_key("author"));
}

#[tokio::test]
async fn missing_restaurant_is_reported_before_body_validation() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/restaurants/01HZZZZZZZZZZZZZZZZZZZZZZZ")
        .json(&json!({ "rating": 42 }))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn add_review_rating_out_of_range_is_bad_request() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    for rating in [0.0, 5.5, -1.0] {
        let response = harness
            .server
            .post(&format!("/restaurants/{restaurant_id}"))
            .json(&json!({ "rating": rating, "text": "Odd" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("rating"));
    }

    assert!(harness.list_reviews(&restaurant_id, 1, 10).await.is_empty());
}

#[tokio::test]
async fn add_review_blank_text_is_bad_request() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .post(&format!("/restaurants/{restaurant_id}"))
        .json(&json!({ "rating": 3, "text": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "text is required");
}

#[tokio::test]
async fn add_review_rating_must_be_number() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .post(&format!("/restaurants/{restaurant_id}"))
        .json(&json!({ "rating": "five", "text": "Great" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn list_reviews_newest_first() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    harness.add_review(&restaurant_id, 3.0, "first").await;
    harness.add_review(&restaurant_id, 4.0, "second").await;
    harness.add_review(&restaurant_id, 5.0, "third").await;

    let reviews = harness.list_reviews(&restaurant_id, 1, 10).await;

    assert_eq!(texts(&reviews), vec!["third", "second", "first"]);
}

#[tokio::test]
async fn list_reviews_defaults_to_first_ten() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    for n in 0..12 {
        harness.add_review(&restaurant_id, 4.0, &format!("review {n}")).await;
    }

    let response = harness
        .server
        .get(&format!("/restaurants/{restaurant_id}/reviews"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let reviews = body["data"].as_array().unwrap();
    assert_eq!(reviews.len(), 10);
    assert_eq!(reviews[0]["text"], "review 11");

    let second_page = harness.list_reviews(&restaurant_id, 2, 10).await;
    assert_eq!(texts(&second_page), vec!["review 1", "review 0"]);
}

#[tokio::test]
async fn list_reviews_past_the_end_is_empty() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    for n in 0..5 {
        harness.add_review(&restaurant_id, 4.0, &format!("review {n}")).await;
    }

    let reviews = harness.list_reviews(&restaurant_id, 2, 10).await;

    assert!(reviews.is_empty());
}

#[tokio::test]
async fn list_reviews_for_restaurant_without_reviews_is_empty() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .get(&format!("/restaurants/{restaurant_id}/reviews"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn list_reviews_rejects_non_positive_page() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .get(&format!("/restaurants/{restaurant_id}/reviews"))
        .add_query_param("page", 0)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "page must be a positive integer");
}

#[tokio::test]
async fn list_reviews_rejects_non_numeric_limit() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .get(&format!("/restaurants/{restaurant_id}/reviews"))
        .add_query_param("limit", "ten")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_reviews_clamps_limit() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_page_size: 2,
        ..test_config()
    });
    let restaurant_id = harness.create_restaurant("Pizza Place", "Downtown").await;
    for n in 0..4 {
        harness.add_review(&restaurant_id, 4.0, &format!("review {n}")).await;
    }

    let reviews = harness.list_reviews(&restaurant_id, 1, 50).await;

    assert_eq!(texts(&reviews), vec!["review 3", "review 2"]);
}

#[tokio::test]
async fn capped_limit_keeps_page_offset() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_page_size: 2,
        ..test_config()
    });
    let restaurant_id = harness.create_restaurant("Pizza Place", "Downtown").await;
    for n in 0..6 {
        harness.add_review(&restaurant_id, 4.0, &format!("review {n}")).await;
    }

    // Page 2 of size 5 starts at index 5 even though at most 2 items are served.
    let reviews = harness.list_reviews(&restaurant_id, 2, 5).await;

    assert_eq!(texts(&reviews), vec!["review 0"]);
}

#[tokio::test]
async fn list_reviews_skips_missing_details() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    harness.add_review(&restaurant_id, 4.0, "kept").await;
    let orphaned = harness.add_review(&restaurant_id, 2.0, "orphaned").await;

    harness
        .store
        .del(&harness.review_details_key(&orphaned))
        .await
        .unwrap();

    let reviews = harness.list_reviews(&restaurant_id, 1, 10).await;

    assert_eq!(texts(&reviews), vec!["kept"]);
}

#[tokio::test]
async fn list_reviews_is_scoped_to_restaurant() {
    let (harness, first) = harness_with_restaurant().await;
    let second = harness.create_restaurant("Noodle Bar", "Harbor").await;
    harness.add_review(&first, 5.0, "for first").await;
    harness.add_review(&second, 1.0, "for second").await;

    let reviews = harness.list_reviews(&first, 1, 10).await;

    assert_eq!(texts(&reviews), vec!["for first"]);
}

#[tokio::test]
async fn list_reviews_for_missing_restaurant_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/restaurants/01HZZZZZZZZZZZZZZZZZZZZZZZ/reviews")
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_review_removes_index_entry_and_detail() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    let kept = harness.add_review(&restaurant_id, 4.0, "kept").await;
    let review_id = harness.add_review(&restaurant_id, 1.0, "removed").await;

    let response = harness
        .server
        .delete(&format!("/restaurants/{restaurant_id}/reviews/{review_id}"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Review deleted");
    assert_eq!(body["data"], review_id.as_str());

    let index = harness
        .store
        .lrange(&harness.reviews_key(&restaurant_id), 0, -1)
        .await
        .unwrap();
    assert_eq!(index, vec![kept]);
    assert!(!harness
        .store
        .exists(&harness.review_details_key(&review_id))
        .await
        .unwrap());

    let reviews = harness.list_reviews(&restaurant_id, 1, 10).await;
    assert_eq!(texts(&reviews), vec!["kept"]);
}

#[tokio::test]
async fn delete_review_twice_is_not_found() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    let review_id = harness.add_review(&restaurant_id, 3.0, "once").await;
    let path = format!("/restaurants/{restaurant_id}/reviews/{review_id}");

    harness.server.delete(&path).await.assert_status_ok();
    let response = harness.server.delete(&path).await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Reviews not found");
}

#[tokio::test]
async fn delete_unknown_review_is_not_found() {
    let (harness, restaurant_id) = harness_with_restaurant().await;

    let response = harness
        .server
        .delete(&format!(
            "/restaurants/{restaurant_id}/reviews/01HZZZZZZZZZZZZZZZZZZZZZZZ"
        ))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "Reviews not found");
}

#[tokio::test]
async fn delete_review_removes_detail_when_index_entry_is_gone() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    let review_id = harness.add_review(&restaurant_id, 2.0, "half gone").await;

    harness
        .store
        .lrem(&harness.reviews_key(&restaurant_id), 0, &review_id)
        .await
        .unwrap();

    let response = harness
        .server
        .delete(&format!("/restaurants/{restaurant_id}/reviews/{review_id}"))
        .await;

    response.assert_status_ok();
    assert!(!harness
        .store
        .exists(&harness.review_details_key(&review_id))
        .await
        .unwrap());
}

#[tokio::test]
async fn delete_review_leaves_restaurant_index_key_intact() {
    let (harness, restaurant_id) = harness_with_restaurant().await;
    harness.add_review(&restaurant_id, 5.0, "stays").await;
    let review_id = harness.add_review(&restaurant_id, 1.0, "goes").await;

    harness
        .server
        .delete(&format!("/restaurants/{restaurant_id}/reviews/{review_id}"))
        .await
        .assert_status_ok();

    assert!(harness
        .store
        .exists(&harness.reviews_key(&restaurant_id))
        .await
        .unwrap());
    assert!(harness
        .store
        .exists(&harness.restaurant_key(&restaurant_id))
        .await
        .unwrap());
}

#[tokio::test]
async fn delete_review_of_missing_restaurant_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .delete("/restaurants/01HZZZZZZZZZZZZZZZZZZZZZZZ/reviews/01HZZZZZZZZZZZZZZZZZZZZZZZ")
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "Restaurant not found");
}
