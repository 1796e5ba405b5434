//! Core types and utilities for tastebook.
//!
//! This crate provides the foundational types shared by the store, the HTTP service
//! and the client SDK:
//!
//! - **Identifiers**: `RestaurantId`, `ReviewId`
//! - **Records**: `Restaurant`, `Review`, and the `HashRecord` codec that maps them
//!   to and from the string field maps held by the key-value store
//! - **Payloads**: `NewRestaurant`, `NewReview`, `Pagination`
//! - **Validation**: the `Validate` trait and `ValidationError`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod page;
pub mod record;
pub mod restaurant;
pub mod review;
pub mod validate;

pub use error::{CoreError, Result};
pub use ids::{IdError, RestaurantId, ReviewId};
pub use page::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use record::{FieldMap, HashRecord};
pub use restaurant::{NewRestaurant, Restaurant};
pub use review::{NewReview, Review, MAX_RATING, MIN_RATING};
pub use validate::{Validate, ValidationError};
