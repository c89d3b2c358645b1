//! Client services for the mela marketplace.
//!
//! Wires the domain core against the store boundary:
//!
//! - [`Session`] — explicitly injected shared state (store handle +
//!   authenticated user).
//! - [`AdComposer`] — the three-step ad submission wizard.
//! - [`FavoritesService`] — live favorite set with idempotent toggle.
//! - [`ListingsService`] — catalog cache and ad management.
//!
//! Every service receives its [`Session`] at construction; nothing here
//! reaches for ambient global state.

pub mod composer;
pub mod error;
pub mod favorites;
pub mod listings;
pub mod session;

pub use composer::AdComposer;
pub use error::{ClientError, ClientResult};
pub use favorites::FavoritesService;
pub use listings::ListingsService;
pub use session::Session;
