//! Catalog cache and ad management.
//!
//! The thin data-fetch layer around the store boundary: a wholesale-
//! replaced catalog cache for browsing, plus the owner-side operations
//! (my ads, edit, delete, mark-as-sold).

use std::sync::Arc;

use tokio::sync::RwLock;

use mela_store::{Listing, UpdateListing};

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Catalog cache plus ad management, shared across views.
///
/// Cheaply cloneable; all clones see the same cache.
#[derive(Clone)]
pub struct ListingsService {
    session: Session,
    items: Arc<RwLock<Vec<Listing>>>,
}

impl ListingsService {
    /// Create a service with an empty catalog cache.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Re-fetch the whole catalog and replace the cache wholesale.
    ///
    /// A fetch failure is logged and yields an empty catalog; browsing
    /// degrades rather than erroring.
    pub async fn refresh(&self) -> Vec<Listing> {
        let items = match self.session.store().listings().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch listings");
                Vec::new()
            }
        };
        *self.items.write().await = items.clone();
        items
    }

    /// The cached catalog.
    pub async fn all(&self) -> Vec<Listing> {
        self.items.read().await.clone()
    }

    /// Every listing owned by the signed-in user.
    pub async fn my_ads(&self) -> ClientResult<Vec<Listing>> {
        let user = self.session.current_user().await.ok_or_else(|| {
            ClientError::Unauthorized("Login is required to view your ads.".to_string())
        })?;
        self.session
            .store()
            .listings_by_owner(&user.uid)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch user ads");
                ClientError::Store(e)
            })
    }

    /// Apply a partial update to an ad and refresh the cached copy.
    pub async fn update_ad(&self, id: &str, patch: UpdateListing) -> ClientResult<Listing> {
        let updated = self
            .session
            .store()
            .update_listing(id, patch)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, listing_id = id, "Failed to update ad");
                ClientError::Store(e)
            })?;

        let mut items = self.items.write().await;
        if let Some(cached) = items.iter_mut().find(|l| l.id == id) {
            *cached = updated.clone();
        }
        Ok(updated)
    }

    /// Delete an ad and drop it from the cache.
    pub async fn delete_ad(&self, id: &str) -> ClientResult<()> {
        self.session
            .store()
            .delete_listing(id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, listing_id = id, "Failed to delete ad");
                ClientError::Store(e)
            })?;

        self.items.write().await.retain(|l| l.id != id);
        Ok(())
    }

    /// Flip an ad's sold flag.
    pub async fn mark_sold(&self, id: &str, sold: bool) -> ClientResult<Listing> {
        self.update_ad(
            id,
            UpdateListing {
                is_sold: Some(sold),
                ..Default::default()
            },
        )
        .await
    }
}
