//! Domain core for the mela classifieds marketplace.
//!
//! Pure types and logic shared by the store boundary and the client
//! services:
//!
//! - [`Category`] — the closed category taxonomy, each variant carrying
//!   its fixed list of required attributes.
//! - [`DraftListing`] / [`WizardStep`] — the ad-composer draft and its
//!   three-step wizard.
//! - [`validation`] — collected field-level validation results.
//! - [`media`] — upload normalization (resize + JPEG re-encode to an
//!   inline data URI).
//!
//! No I/O happens here; everything is synchronous and store-agnostic.

pub mod auth;
pub mod category;
pub mod draft;
pub mod error;
pub mod media;
pub mod types;
pub mod validation;

pub use auth::AuthUser;
pub use category::Category;
pub use draft::{DraftListing, WizardStep};
pub use error::CoreError;
pub use validation::ValidationErrors;
