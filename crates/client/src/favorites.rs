//! Live favorite set with idempotent toggle.
//!
//! Maintains, per authenticated user, the current set of favorited
//! listing ids, fed by the store's snapshot-replace subscription. The
//! subscription watcher is the only writer of the local view: a toggle
//! writes to the store and waits for the live query to reflect the
//! change, so the view may lag but never diverges from store truth.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use mela_store::{CreateFavorite, Favorite, Listing};

use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Teardown state for the active subscription watcher.
struct Watcher {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Per-session live view of favorite edges.
///
/// The consumer owns a single active subscription per user session:
/// call [`refresh_subscription`](Self::refresh_subscription) once after
/// construction and again after every identity change, and
/// [`shutdown`](Self::shutdown) (or drop the service) when the view
/// goes away.
pub struct FavoritesService {
    session: Session,
    /// Latest snapshot of the current user's edges. Written only by the
    /// subscription watcher (and emptied on sign-out).
    snapshot: Arc<watch::Sender<Vec<Favorite>>>,
    watcher: Mutex<Option<Watcher>>,
}

impl FavoritesService {
    /// Create a service with an empty snapshot and no subscription.
    pub fn new(session: Session) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self {
            session,
            snapshot: Arc::new(snapshot),
            watcher: Mutex::new(None),
        }
    }

    /// Whether `listing_id` is currently favorited. Pure membership
    /// check against the in-memory snapshot; no store call.
    pub fn is_favorite(&self, listing_id: &str) -> bool {
        self.snapshot
            .borrow()
            .iter()
            .any(|f| f.listing_id == listing_id)
    }

    /// Filter `all` down to the currently favorited listings.
    pub fn favorite_listings(&self, all: &[Listing]) -> Vec<Listing> {
        all.iter()
            .filter(|l| self.is_favorite(&l.id))
            .cloned()
            .collect()
    }

    /// A receiver that observes every snapshot replacement, for views
    /// (and tests) that want to await changes.
    pub fn watch_snapshot(&self) -> watch::Receiver<Vec<Favorite>> {
        self.snapshot.subscribe()
    }

    /// Tear down any active subscription and, if a user is signed in,
    /// establish a new one keyed on their id.
    ///
    /// Waits for the initial snapshot, so the view is consistent with
    /// the store when this returns. With no signed-in user the snapshot
    /// empties and no subscription runs.
    pub async fn refresh_subscription(&self) -> ClientResult<()> {
        let mut watcher = self.watcher.lock().await;

        // Tear down the previous subscription exactly once.
        if let Some(active) = watcher.take() {
            active.cancel.cancel();
            let _ = active.handle.await;
        }

        let Some(user) = self.session.current_user().await else {
            self.snapshot.send_replace(Vec::new());
            return Ok(());
        };

        let mut subscription = self
            .session
            .store()
            .subscribe_favorites(&user.uid)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, uid = %user.uid, "Failed to subscribe to favorites");
                ClientError::Store(e)
            })?;

        if let Some(initial) = subscription.recv().await {
            self.snapshot.send_replace(initial);
        }

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let snapshot = Arc::clone(&self.snapshot);
        let uid = user.uid.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    delivery = subscription.recv() => match delivery {
                        // Each delivery is authoritative and total.
                        Some(edges) => {
                            snapshot.send_replace(edges);
                        }
                        None => {
                            tracing::debug!(uid = %uid, "favorites subscription closed by store");
                            break;
                        }
                    },
                }
            }
        });

        *watcher = Some(Watcher { cancel, handle });
        Ok(())
    }

    /// Flip `listing_id`'s membership for the signed-in user.
    ///
    /// Creates the edge if absent, deletes it if present. There is no
    /// optimistic local mutation: the store write completes here and the
    /// subscription delivers the new snapshot afterwards. Idempotent
    /// under repeated sequential calls.
    pub async fn toggle_favorite(&self, listing_id: &str) -> ClientResult<()> {
        let user = self.session.current_user().await.ok_or_else(|| {
            ClientError::Unauthorized("Please login to add favorites".to_string())
        })?;

        let existing = self
            .snapshot
            .borrow()
            .iter()
            .find(|f| f.listing_id == listing_id)
            .map(|f| f.id.clone());

        match existing {
            Some(edge_id) => {
                self.session
                    .store()
                    .delete_favorite(&edge_id)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, listing_id, "Failed to remove favorite");
                        ClientError::Store(e)
                    })?;
            }
            None => {
                self.session
                    .store()
                    .create_favorite(CreateFavorite {
                        user_id: user.uid,
                        listing_id: listing_id.to_string(),
                    })
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, listing_id, "Failed to add favorite");
                        ClientError::Store(e)
                    })?;
            }
        }
        Ok(())
    }

    /// Tear down the subscription. Safe to call more than once; the
    /// watcher is cancelled exactly once.
    pub async fn shutdown(&self) {
        if let Some(active) = self.watcher.lock().await.take() {
            active.cancel.cancel();
            let _ = active.handle.await;
        }
    }
}

impl Drop for FavoritesService {
    fn drop(&mut self) {
        // Best-effort teardown for consumers that never called shutdown.
        if let Ok(mut watcher) = self.watcher.try_lock() {
            if let Some(active) = watcher.take() {
                active.cancel.cancel();
                active.handle.abort();
            }
        }
    }
}
