//! Key naming for the key-value store.
//!
//! Every key is `{namespace}:{class}:{id}`. All reads and writes build their keys here so
//! the layout cannot drift between callers.

use tastebook_core::{RestaurantId, ReviewId};

/// Namespace used when none is configured.
///
/// Data written by the earlier deployment lives under [`LEGACY_NAMESPACE`] instead.
pub const DEFAULT_NAMESPACE: &str = "tastebook";

/// Namespace of the earlier `redis-express` deployment's keys.
pub const LEGACY_NAMESPACE: &str = "redis-express";

/// Delimiter between key segments.
pub const DELIMITER: char = ':';

/// Entity class tags.
pub mod class {
    /// Restaurant hashes.
    pub const RESTAURANTS: &str = "restaurants";

    /// Per-restaurant review index lists.
    pub const REVIEWS: &str = "reviews";

    /// Review detail hashes.
    pub const REVIEW_DETAILS: &str = "review_details";
}

/// Builds namespaced storage keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    /// Create a key space under `namespace`.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// The namespace prefix.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Join the namespace, an entity class and an id.
    #[must_use]
    pub fn key(&self, class: &str, id: &str) -> String {
        format!("{}{DELIMITER}{class}{DELIMITER}{id}", self.namespace)
    }

    /// Key of a restaurant hash.
    #[must_use]
    pub fn restaurant(&self, id: &RestaurantId) -> String {
        self.key(class::RESTAURANTS, id.as_str())
    }

    /// Key of a restaurant's review index list.
    #[must_use]
    pub fn reviews(&self, restaurant_id: &RestaurantId) -> String {
        self.key(class::REVIEWS, restaurant_id.as_str())
    }

    /// Key of a review detail hash.
    #[must_use]
    pub fn review_details(&self, review_id: &ReviewId) -> String {
        self.key(class::REVIEW_DETAILS, review_id.as_str())
    }
}

impl Default for KeySpace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restaurant_key_format() {
        let keys = KeySpace::new(LEGACY_NAMESPACE);
        let id: RestaurantId = "abc123".parse().unwrap();
        assert_eq!(keys.restaurant(&id), "redis-express:restaurants:abc123");
    }

    #[test]
    fn review_keys_format() {
        let keys = KeySpace::default();
        let restaurant_id: RestaurantId = "r1".parse().unwrap();
        let review_id: ReviewId = "v1".parse().unwrap();

        assert_eq!(keys.reviews(&restaurant_id), "tastebook:reviews:r1");
        assert_eq!(keys.review_details(&review_id), "tastebook:review_details:v1");
    }

    #[test]
    fn classes_do_not_collide() {
        let keys = KeySpace::default();
        let restaurant_id: RestaurantId = "same".parse().unwrap();
        let review_id: ReviewId = "same".parse().unwrap();

        let all = [
            keys.restaurant(&restaurant_id),
            keys.reviews(&restaurant_id),
            keys.review_details(&review_id),
        ];
        assert_ne!(all[0], all[1]);
        assert_ne!(all[1], all[2]);
        assert_ne!(all[0], all[2]);
    }
}
