//! Review records and payloads.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{RestaurantId, ReviewId};
use crate::record::{parsed, required, FieldMap, HashRecord};
use crate::validate::{require_in_range, require_non_blank, Validate, ValidationError};

/// Lowest accepted rating.
pub const MIN_RATING: f64 = 1.0;

/// Highest accepted rating.
pub const MAX_RATING: f64 = 5.0;

/// A review of a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review ID.
    pub id: ReviewId,
    /// The restaurant this review belongs to.
    pub restaurant_id: RestaurantId,
    /// Rating between `MIN_RATING` and `MAX_RATING`.
    pub rating: f64,
    /// Review text.
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Review {
    /// Build a review for `restaurant_id` with a fresh id, stamped with the current time.
    #[must_use]
    pub fn new(restaurant_id: RestaurantId, input: NewReview) -> Self {
        Self {
            id: ReviewId::generate(),
            restaurant_id,
            rating: input.rating,
            text: input.text,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

impl HashRecord for Review {
    fn to_fields(&self) -> FieldMap {
        FieldMap::from([
            ("id".to_string(), self.id.to_string()),
            ("restaurantId".to_string(), self.restaurant_id.to_string()),
            ("rating".to_string(), self.rating.to_string()),
            ("text".to_string(), self.text.clone()),
            ("timestamp".to_string(), self.timestamp.to_string()),
        ])
    }

    fn from_fields(fields: &FieldMap) -> Result<Self> {
        Ok(Self {
            id: parsed(fields, "id")?,
            restaurant_id: parsed(fields, "restaurantId")?,
            rating: parsed(fields, "rating")?,
            text: required(fields, "text")?.to_string(),
            timestamp: parsed(fields, "timestamp")?,
        })
    }
}

/// Add review request body.
///
/// Only `rating` and `text` are kept. Any other fields in the request body are
/// ignored and never reach the stored review.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewReview {
    /// Rating between `MIN_RATING` and `MAX_RATING`.
    pub rating: f64,
    /// Review text.
    pub text: String,
}

impl Validate for NewReview {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        require_in_range("rating", self.rating, MIN_RATING, MAX_RATING)?;
        require_non_blank("text", &self.text)
    }
}
