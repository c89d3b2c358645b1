//! Favorite edges (`favorites` collection).

use serde::{Deserialize, Serialize};

use mela_core::types::{DocId, Timestamp};

/// A user-favorite edge: `user_id` favorited `listing_id`.
///
/// Membership is expressed by the edge's existence, never by a flag on
/// the listing, and edges are strictly per-user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    /// Store-assigned document id.
    pub id: DocId,
    pub user_id: String,
    pub listing_id: DocId,
    pub created_at: Timestamp,
}

impl Favorite {
    /// Store collection name.
    pub const COLLECTION: &'static str = "favorites";
}

/// DTO for creating a favorite edge. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFavorite {
    pub user_id: String,
    pub listing_id: DocId,
}
