//! The [`MarketStore`] trait: the external document store's data contract.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::favorite::{CreateFavorite, Favorite};
use crate::models::listing::{CreateListing, Listing, UpdateListing};
use crate::subscription::FavoriteSubscription;

/// Typed boundary to the hosted document store.
///
/// All calls are asynchronous single attempts; implementations do not
/// retry. The hosted backend's adapter implements this trait out of
/// tree; [`MemoryStore`](crate::MemoryStore) implements it for tests and
/// demos.
#[async_trait]
pub trait MarketStore: Send + Sync {
    // --- Products ---

    /// Create a listing document. The store assigns the id and creation
    /// timestamp and returns the persisted document.
    async fn create_listing(&self, input: CreateListing) -> Result<Listing, StoreError>;

    /// Fetch the whole catalog. Order is not significant.
    async fn listings(&self) -> Result<Vec<Listing>, StoreError>;

    /// Fetch every listing owned by `user_id`.
    async fn listings_by_owner(&self, user_id: &str) -> Result<Vec<Listing>, StoreError>;

    /// Apply a partial update and return the updated document.
    async fn update_listing(
        &self,
        id: &str,
        patch: UpdateListing,
    ) -> Result<Listing, StoreError>;

    /// Delete a listing document.
    async fn delete_listing(&self, id: &str) -> Result<(), StoreError>;

    // --- favorites ---

    /// Create a favorite edge. The store assigns the id and creation
    /// timestamp.
    async fn create_favorite(&self, input: CreateFavorite) -> Result<Favorite, StoreError>;

    /// Delete a favorite edge by its document id.
    async fn delete_favorite(&self, id: &str) -> Result<(), StoreError>;

    /// Every favorite edge belonging to `user_id`.
    async fn favorites_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError>;

    /// Open a standing snapshot-replace subscription on `user_id`'s
    /// favorite edges. The initial snapshot is delivered immediately.
    async fn subscribe_favorites(
        &self,
        user_id: &str,
    ) -> Result<FavoriteSubscription, StoreError>;
}
