//! External document-store boundary for the mela marketplace.
//!
//! The durable authority for listings and favorite edges is a hosted
//! document store; this crate defines the typed contract the rest of the
//! workspace consumes:
//!
//! - [`models`] — persisted documents and their create/update DTOs.
//! - [`MarketStore`] — the async trait every backend adapter implements.
//! - [`FavoriteSubscription`] — snapshot-replace live query handle.
//! - [`MemoryStore`] — in-memory implementation backing tests and demos.

pub mod error;
pub mod memory;
pub mod models;
pub mod store;
pub mod subscription;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::favorite::{CreateFavorite, Favorite};
pub use models::listing::{CreateListing, Listing, UpdateListing};
pub use store::MarketStore;
pub use subscription::FavoriteSubscription;
