//! Persisted document models and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize`/`Deserialize` document struct matching the stored shape
//! - A create DTO for inserts
//! - An update DTO (all-`Option` fields) for partial patches

pub mod favorite;
pub mod listing;
