//! Store boundary error type.

use thiserror::Error;

/// Errors surfaced by [`MarketStore`](crate::MarketStore) implementations.
///
/// Every mutating call is a single all-or-nothing attempt; no automatic
/// retry or backoff happens anywhere behind this boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced document does not exist.
    #[error("{collection} document {id} not found")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    /// The backend rejected the operation or could not be reached.
    #[error("store backend error: {0}")]
    Backend(String),
}
