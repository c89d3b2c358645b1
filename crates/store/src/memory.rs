//! In-memory [`MarketStore`] used by tests and the demo.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use mela_core::types::DocId;

use crate::error::StoreError;
use crate::models::favorite::{CreateFavorite, Favorite};
use crate::models::listing::{CreateListing, Listing, UpdateListing};
use crate::store::MarketStore;
use crate::subscription::FavoriteSubscription;

/// Sender half of one user's favorites subscription.
struct FavoriteSubscriber {
    user_id: String,
    tx: mpsc::UnboundedSender<Vec<Favorite>>,
}

/// In-memory document store.
///
/// Thread-safe via interior `RwLock`; share via `Arc`. Mirrors the
/// hosted backend's observable behavior: store-assigned string ids,
/// `created_at` stamped on insert, and an initial snapshot delivered on
/// subscribe. Subscribers whose handles were dropped are pruned on the
/// next publish.
#[derive(Default)]
pub struct MemoryStore {
    listings: RwLock<HashMap<DocId, Listing>>,
    favorites: RwLock<HashMap<DocId, Favorite>>,
    subscribers: RwLock<Vec<FavoriteSubscriber>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live favorites subscribers (post-pruning).
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    fn next_id() -> DocId {
        Uuid::new_v4().to_string()
    }

    /// Current favorite edges for one user.
    async fn favorites_snapshot(&self, user_id: &str) -> Vec<Favorite> {
        self.favorites
            .read()
            .await
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Push the current snapshot for `user_id` to every matching
    /// subscriber, pruning closed channels.
    async fn publish_favorites(&self, user_id: &str) {
        let snapshot = self.favorites_snapshot(user_id).await;
        let mut subscribers = self.subscribers.write().await;
        subscribers.retain(|sub| {
            if sub.user_id != user_id {
                return true;
            }
            // A failed send means the subscription handle was dropped.
            sub.tx.send(snapshot.clone()).is_ok()
        });
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn create_listing(&self, input: CreateListing) -> Result<Listing, StoreError> {
        let listing = Listing {
            id: Self::next_id(),
            title: input.title,
            category: input.category,
            price: input.price,
            description: input.description,
            location: input.location,
            category_fields: input.category_fields,
            image_url: input.image_url,
            user_id: input.user_id,
            user_name: input.user_name,
            created_at: Utc::now(),
            is_sold: false,
        };
        self.listings
            .write()
            .await
            .insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    async fn listings(&self) -> Result<Vec<Listing>, StoreError> {
        Ok(self.listings.read().await.values().cloned().collect())
    }

    async fn listings_by_owner(&self, user_id: &str) -> Result<Vec<Listing>, StoreError> {
        Ok(self
            .listings
            .read()
            .await
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_listing(
        &self,
        id: &str,
        patch: UpdateListing,
    ) -> Result<Listing, StoreError> {
        let mut listings = self.listings.write().await;
        let listing = listings.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: Listing::COLLECTION,
            id: id.to_string(),
        })?;

        if let Some(title) = patch.title {
            listing.title = title;
        }
        if let Some(price) = patch.price {
            listing.price = price;
        }
        if let Some(description) = patch.description {
            listing.description = description;
        }
        if let Some(location) = patch.location {
            listing.location = location;
        }
        if let Some(category_fields) = patch.category_fields {
            listing.category_fields = category_fields;
        }
        if let Some(image_url) = patch.image_url {
            listing.image_url = image_url;
        }
        if let Some(is_sold) = patch.is_sold {
            listing.is_sold = is_sold;
        }

        Ok(listing.clone())
    }

    async fn delete_listing(&self, id: &str) -> Result<(), StoreError> {
        self.listings
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                collection: Listing::COLLECTION,
                id: id.to_string(),
            })
    }

    async fn create_favorite(&self, input: CreateFavorite) -> Result<Favorite, StoreError> {
        let favorite = Favorite {
            id: Self::next_id(),
            user_id: input.user_id,
            listing_id: input.listing_id,
            created_at: Utc::now(),
        };
        self.favorites
            .write()
            .await
            .insert(favorite.id.clone(), favorite.clone());
        self.publish_favorites(&favorite.user_id).await;
        Ok(favorite)
    }

    async fn delete_favorite(&self, id: &str) -> Result<(), StoreError> {
        let removed = self.favorites.write().await.remove(id);
        match removed {
            Some(favorite) => {
                self.publish_favorites(&favorite.user_id).await;
                Ok(())
            }
            None => Err(StoreError::NotFound {
                collection: Favorite::COLLECTION,
                id: id.to_string(),
            }),
        }
    }

    async fn favorites_by_user(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError> {
        Ok(self.favorites_snapshot(user_id).await)
    }

    async fn subscribe_favorites(
        &self,
        user_id: &str,
    ) -> Result<FavoriteSubscription, StoreError> {
        let (tx, rx) = mpsc::unbounded_channel();

        // Live queries start with the current result set.
        let snapshot = self.favorites_snapshot(user_id).await;
        let _ = tx.send(snapshot);

        self.subscribers.write().await.push(FavoriteSubscriber {
            user_id: user_id.to_string(),
            tx,
        });
        tracing::debug!(user_id, "favorites subscription opened");

        Ok(FavoriteSubscription::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use mela_core::Category;

    fn sample_listing(user_id: &str) -> CreateListing {
        CreateListing {
            title: "iPhone 12".to_string(),
            category: Category::Mobiles,
            price: 25000.0,
            description: "Great condition, barely used".to_string(),
            location: "Mumbai".to_string(),
            category_fields: BTreeMap::from([
                ("brand".to_string(), "Apple".to_string()),
                ("model".to_string(), "12".to_string()),
                ("condition".to_string(), "Used".to_string()),
            ]),
            image_url: "data:image/jpeg;base64,AAAA".to_string(),
            user_id: user_id.to_string(),
            user_name: "Asha".to_string(),
        }
    }

    #[tokio::test]
    async fn create_listing_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let listing = store.create_listing(sample_listing("uid-1")).await.unwrap();
        assert!(!listing.id.is_empty());
        assert!(!listing.is_sold);

        let all = store.listings().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], listing);
    }

    #[tokio::test]
    async fn listings_by_owner_filters() {
        let store = MemoryStore::new();
        store.create_listing(sample_listing("uid-1")).await.unwrap();
        store.create_listing(sample_listing("uid-2")).await.unwrap();

        let mine = store.listings_by_owner("uid-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, "uid-1");
    }

    #[tokio::test]
    async fn update_listing_patches_only_given_fields() {
        let store = MemoryStore::new();
        let listing = store.create_listing(sample_listing("uid-1")).await.unwrap();

        let updated = store
            .update_listing(
                &listing.id,
                UpdateListing {
                    price: Some(22000.0),
                    is_sold: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 22000.0);
        assert!(updated.is_sold);
        assert_eq!(updated.title, listing.title);
        assert_eq!(updated.category_fields, listing.category_fields);
    }

    #[tokio::test]
    async fn update_missing_listing_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_listing("missing", UpdateListing::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound { collection, .. } if collection == Listing::COLLECTION
        ));
    }

    #[tokio::test]
    async fn delete_listing_removes_document() {
        let store = MemoryStore::new();
        let listing = store.create_listing(sample_listing("uid-1")).await.unwrap();
        store.delete_listing(&listing.id).await.unwrap();
        assert!(store.listings().await.unwrap().is_empty());
        assert!(store.delete_listing(&listing.id).await.is_err());
    }

    #[tokio::test]
    async fn subscribe_delivers_initial_snapshot() {
        let store = MemoryStore::new();
        store
            .create_favorite(CreateFavorite {
                user_id: "uid-1".to_string(),
                listing_id: "l-1".to_string(),
            })
            .await
            .unwrap();

        let mut sub = store.subscribe_favorites("uid-1").await.unwrap();
        let snapshot = sub.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].listing_id, "l-1");
    }

    #[tokio::test]
    async fn changes_publish_full_snapshots_to_own_user_only() {
        let store = MemoryStore::new();
        let mut sub_a = store.subscribe_favorites("uid-a").await.unwrap();
        let mut sub_b = store.subscribe_favorites("uid-b").await.unwrap();
        assert!(sub_a.recv().await.unwrap().is_empty());
        assert!(sub_b.recv().await.unwrap().is_empty());

        let edge = store
            .create_favorite(CreateFavorite {
                user_id: "uid-a".to_string(),
                listing_id: "l-1".to_string(),
            })
            .await
            .unwrap();

        let snapshot = sub_a.recv().await.unwrap();
        assert_eq!(snapshot.len(), 1);

        store.delete_favorite(&edge.id).await.unwrap();
        let snapshot = sub_a.recv().await.unwrap();
        assert!(snapshot.is_empty());

        // B never saw anything beyond its initial empty snapshot.
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            sub_b.recv(),
        )
        .await;
        assert!(pending.is_err(), "uid-b received another user's snapshot");
    }

    #[tokio::test]
    async fn dropped_subscription_is_pruned_on_next_publish() {
        let store = MemoryStore::new();
        let sub = store.subscribe_favorites("uid-1").await.unwrap();
        assert_eq!(store.subscriber_count().await, 1);

        drop(sub);
        store
            .create_favorite(CreateFavorite {
                user_id: "uid-1".to_string(),
                listing_id: "l-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.subscriber_count().await, 0);
    }

    #[tokio::test]
    async fn delete_missing_favorite_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete_favorite("missing").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound { collection, .. } if collection == Favorite::COLLECTION
        ));
    }
}
