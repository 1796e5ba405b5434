//! Error types for tastebook core.

use crate::ids::IdError;
use crate::validate::ValidationError;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when building or decoding tastebook records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A stored record is missing a required field.
    #[error("record is missing field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// A stored record has a field that cannot be decoded.
    #[error("invalid value for field {field}: {value:?}")]
    InvalidField {
        /// The offending field name.
        field: &'static str,
        /// The raw stored value.
        value: String,
    },

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// A payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
