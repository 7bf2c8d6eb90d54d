//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Player records, keyed by user ID.
    pub const USERS: &str = "users";

    /// Committed purchase receipts, keyed by purchase token.
    pub const PURCHASES: &str = "purchases";

    /// Denormalized active-subscription receipt per player, keyed by user ID.
    pub const SUBSCRIPTIONS: &str = "subscriptions";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::USERS, cf::PURCHASES, cf::SUBSCRIPTIONS]
}
