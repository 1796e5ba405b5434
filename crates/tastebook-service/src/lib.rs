//! Tastebook HTTP API Service.
//!
//! This crate provides the HTTP API for tastebook:
//!
//! - Restaurant creation and lookup (with view counting)
//! - Review creation, paginated listing and deletion
//!
//! Every response body uses the envelope `{success, data?, message?, error?}`. Routes
//! nested under a restaurant id are guarded: they only run when the restaurant exists.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result

pub mod config;
pub mod error;
pub mod extract;
pub mod guard;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use error::ApiError;
pub use response::Envelope;
pub use routes::create_router;
pub use state::AppState;
