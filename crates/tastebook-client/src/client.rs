//! Tastebook HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use tastebook_core::{
    NewRestaurant, NewReview, Pagination, Restaurant, RestaurantId, Review, ReviewId, Validate,
};

use crate::error::ClientError;
use crate::types::{ApiEnvelope, HealthStatus};

/// Tastebook API client.
///
/// Provides methods for managing restaurants and their reviews.
#[derive(Debug, Clone)]
pub struct TastebookClient {
    client: Client,
    base_url: Url,
}

impl TastebookClient {
    /// Create a new tastebook client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the tastebook service (e.g., `"http://tastebook:3000"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new tastebook client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| ClientError::Configuration(format!("invalid base URL {raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL cannot carry a path: {raw}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(format!(
                "{} tastebook-client/{}",
                options.service_name,
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .client
            .get(self.endpoint(&["health"])?)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response.json().await?);
        }
        Err(error_from_response(response).await)
    }

    /// Create a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the body is invalid, or an error if the request fails.
    pub async fn create_restaurant(
        &self,
        restaurant: &NewRestaurant,
    ) -> Result<Restaurant, ClientError> {
        restaurant.validate()?;

        let response = self
            .client
            .post(self.endpoint(&["restaurants"])?)
            .json(restaurant)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch a restaurant. Every fetch counts as a view.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the restaurant does not exist, or an error if the request fails.
    pub async fn get_restaurant(&self, id: &RestaurantId) -> Result<Restaurant, ClientError> {
        let url = self.endpoint(&["restaurants", id.as_str()])?;

        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Add a review to a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the body is invalid, `NotFound` if the restaurant does
    /// not exist, or an error if the request fails.
    pub async fn add_review(
        &self,
        restaurant_id: &RestaurantId,
        review: &NewReview,
    ) -> Result<Review, ClientError> {
        review.validate()?;

        let response = self
            .client
            .post(self.endpoint(&["restaurants", restaurant_id.as_str()])?)
            .json(review)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List a restaurant's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the restaurant does not exist, or an error if the request fails.
    pub async fn list_reviews(
        &self,
        restaurant_id: &RestaurantId,
        page: Pagination,
    ) -> Result<Vec<Review>, ClientError> {
        page.validate()?;

        let response = self
            .client
            .get(self.endpoint(&["restaurants", restaurant_id.as_str(), "reviews"])?)
            .query(&page)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a review, returning its id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the restaurant or review does not exist, or an error if
    /// the request fails.
    pub async fn delete_review(
        &self,
        restaurant_id: &RestaurantId,
        review_id: &ReviewId,
    ) -> Result<ReviewId, ClientError> {
        let url = self.endpoint(&[
            "restaurants",
            restaurant_id.as_str(),
            "reviews",
            review_id.as_str(),
        ])?;

        let response = self.client.delete(url).send().await?;

        self.handle_response(response).await
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Configuration("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Unwrap the response envelope or convert the error.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| ClientError::UnexpectedResponse("response carried no data".into()))
    }
}

async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();

    let message = match response.json::<ApiEnvelope<serde_json::Value>>().await {
        Ok(envelope) => envelope.error.unwrap_or_else(|| format!("HTTP {status}")),
        Err(_) => format!("HTTP {status}"),
    };

    tracing::debug!(status = status.as_u16(), %message, "Tastebook API error");

    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound { message },
        StatusCode::BAD_REQUEST => ClientError::Validation { message },
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Service name sent in the user agent.
    pub service_name: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            service_name: "unknown".to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a service name.
    #[must_use]
    pub fn with_service_name(name: impl Into<String>) -> Self {
        Self {
            service_name: name.into(),
            ..Self::default()
        }
    }
}
