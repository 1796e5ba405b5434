//! Mapping between typed records and key-value hashes.
//!
//! The store keeps every record as a flat hash of string fields. Numbers are written in
//! their decimal form and parsed back on read.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// The field map of a stored hash.
pub type FieldMap = HashMap<String, String>;

/// A record that is persisted as a hash of string fields.
pub trait HashRecord: Sized {
    /// Encode the record into hash fields.
    fn to_fields(&self) -> FieldMap;

    /// Decode the record from hash fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or cannot be parsed.
    fn from_fields(fields: &FieldMap) -> Result<Self>;
}

/// Fetch a required field.
pub(crate) fn required<'a>(fields: &'a FieldMap, field: &'static str) -> Result<&'a str> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or(CoreError::MissingField { field })
}

/// Fetch and parse a required field.
pub(crate) fn parsed<T: FromStr>(fields: &FieldMap, field: &'static str) -> Result<T> {
    let raw = required(fields, field)?;
    raw.parse().map_err(|_| CoreError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

/// Fetch and parse an optional field, falling back to `default` when absent.
pub(crate) fn parsed_or<T: FromStr>(fields: &FieldMap, field: &'static str, default: T) -> Result<T> {
    match fields.get(field) {
        None => Ok(default),
        Some(_) => parsed(fields, field),
    }
}
