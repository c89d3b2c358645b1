//! Live favorite-edge subscriptions.
//!
//! The store delivers **full snapshots** of one user's favorite edges:
//! one on subscribe, then one per remote change, for the lifetime of the
//! handle. Each delivery is authoritative and total — a replacement,
//! never a delta.

use tokio::sync::mpsc;

use crate::models::favorite::Favorite;

/// Receiving half of a favorites live query.
///
/// Dropping the handle is the unsubscribe; the store prunes the closed
/// channel on its next publish.
#[derive(Debug)]
pub struct FavoriteSubscription {
    rx: mpsc::UnboundedReceiver<Vec<Favorite>>,
}

impl FavoriteSubscription {
    /// Wrap a snapshot channel. Store implementations push the initial
    /// snapshot before handing the subscription out.
    pub fn new(rx: mpsc::UnboundedReceiver<Vec<Favorite>>) -> Self {
        Self { rx }
    }

    /// Receive the next full snapshot. `None` means the store side shut
    /// down and no further deliveries will arrive.
    pub async fn recv(&mut self) -> Option<Vec<Favorite>> {
        self.rx.recv().await
    }
}
