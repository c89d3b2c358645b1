//! Core error type shared across the workspace.

use thiserror::Error;

/// Domain-level error for mela operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity lookup failed.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A single-message validation failure.
    ///
    /// Field-level collections use
    /// [`ValidationErrors`](crate::validation::ValidationErrors) instead.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with the current state.
    #[error("{0}")]
    Conflict(String),

    /// The operation requires an authenticated user.
    #[error("{0}")]
    Unauthorized(String),

    /// Image decoding or encoding failed during upload normalization.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// Any other internal failure.
    #[error("{0}")]
    Internal(String),
}
