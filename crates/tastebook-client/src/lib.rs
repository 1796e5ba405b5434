//! Tastebook Client SDK.
//!
//! A typed client for the tastebook HTTP API. Response envelopes are unwrapped, so
//! each call returns the record itself or a [`ClientError`].
//!
//! # Example
//!
//! ```no_run
//! use tastebook_client::{NewRestaurant, NewReview, Pagination, TastebookClient};
//!
//! # async fn example() -> Result<(), tastebook_client::ClientError> {
//! let client = TastebookClient::new("http://localhost:3000")?;
//!
//! let restaurant = client
//!     .create_restaurant(&NewRestaurant {
//!         name: "Pizza Place".to_string(),
//!         location: "Downtown".to_string(),
//!     })
//!     .await?;
//!
//! client
//!     .add_review(
//!         &restaurant.id,
//!         &NewReview {
//!             rating: 5.0,
//!             text: "Great".to_string(),
//!         },
//!     )
//!     .await?;
//!
//! let reviews = client.list_reviews(&restaurant.id, Pagination::default()).await?;
//! println!("{} reviews", reviews.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, TastebookClient};
pub use error::ClientError;
pub use types::*;

pub use tastebook_core::{
    NewRestaurant, NewReview, Pagination, Restaurant, RestaurantId, Review, ReviewId,
};
