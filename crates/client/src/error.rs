//! Client-level error type for service operations.

use mela_core::{CoreError, ValidationErrors};
use mela_store::StoreError;

/// Error type returned by the client services.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for the
/// store boundary, and adds the field-level validation map the wizard
/// surfaces.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Collected field-level validation failures. Local only — these
    /// never reach the store.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// The operation requires an authenticated user. No retry is
    /// scheduled; the user signs in and retries manually.
    #[error("{0}")]
    Unauthorized(String),

    /// The operation conflicts with in-flight or current wizard state.
    #[error("{0}")]
    Conflict(String),

    /// A domain-level error from `mela-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store boundary failed. Draft and form state are preserved so
    /// the user can retry manually.
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

impl ClientError {
    /// The validation error map, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Convenience alias for client service results.
pub type ClientResult<T> = Result<T, ClientError>;
