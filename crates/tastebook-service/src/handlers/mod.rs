//! API handlers.

pub mod health;
pub mod restaurants;
pub mod reviews;
