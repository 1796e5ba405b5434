//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Every key-value entry, keyed by its full namespaced key.
    /// Values are CBOR-encoded hashes or lists.
    pub const ENTRIES: &str = "entries";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::ENTRIES]
}
