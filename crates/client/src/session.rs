//! Explicitly shared session state.

use std::sync::Arc;

use tokio::sync::RwLock;

use mela_core::AuthUser;
use mela_store::MarketStore;

/// Shared state injected into every service at construction.
///
/// Cheaply cloneable (inner data behind `Arc`). Holds the store handle
/// and the authenticated user, which the external identity provider
/// drives via [`sign_in`](Session::sign_in) / [`sign_out`](Session::sign_out).
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn MarketStore>,
    user: Arc<RwLock<Option<AuthUser>>>,
}

impl Session {
    /// Create a session over a store with no signed-in user.
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self {
            store,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Handle to the document store.
    pub fn store(&self) -> &Arc<dyn MarketStore> {
        &self.store
    }

    /// The currently authenticated user, if any.
    pub async fn current_user(&self) -> Option<AuthUser> {
        self.user.read().await.clone()
    }

    /// Record a sign-in from the identity provider.
    ///
    /// Services holding a standing per-user subscription must be told to
    /// re-establish it afterwards (see
    /// [`FavoritesService::refresh_subscription`](crate::FavoritesService::refresh_subscription)).
    pub async fn sign_in(&self, user: AuthUser) {
        tracing::info!(uid = %user.uid, "user signed in");
        *self.user.write().await = Some(user);
    }

    /// Record a sign-out.
    pub async fn sign_out(&self) {
        tracing::info!("user signed out");
        *self.user.write().await = None;
    }
}
