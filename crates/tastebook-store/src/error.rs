//! Error types for tastebook storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or opened.
    #[error("store unavailable: {0}")]
    Connectivity(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A hash operation was applied to a list, or the reverse.
    #[error("wrong kind of value held at {key}")]
    WrongType {
        /// The offending key.
        key: String,
    },

    /// An increment targeted a field that does not hold an integer.
    #[error("field {field} at {key} is not an integer")]
    NotAnInteger {
        /// The hash key.
        key: String,
        /// The hash field.
        field: String,
    },

    /// An increment would overflow the field.
    #[error("increment of {field} at {key} would overflow")]
    Overflow {
        /// The hash key.
        key: String,
        /// The hash field.
        field: String,
    },
}
