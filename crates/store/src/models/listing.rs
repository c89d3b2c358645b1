//! Listing documents (`Products` collection).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use mela_core::types::{DocId, Timestamp};
use mela_core::Category;

/// A published ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Store-assigned document id.
    pub id: DocId,
    pub title: String,
    /// Closed category taxonomy, serialized by its stable id. The display
    /// name is derived via [`Category::name`], never stored separately.
    pub category: Category,
    pub price: f64,
    pub description: String,
    pub location: String,
    /// Category attribute values keyed by required-attribute name.
    pub category_fields: BTreeMap<String, String>,
    /// Inline `data:image/jpeg;base64,...` URI; no object storage.
    pub image_url: String,
    /// Owner's auth uid.
    pub user_id: String,
    /// Owner display name captured at creation time.
    pub user_name: String,
    pub created_at: Timestamp,
    /// Whether the owner marked the ad as sold.
    #[serde(default)]
    pub is_sold: bool,
}

impl Listing {
    /// Store collection name.
    pub const COLLECTION: &'static str = "Products";
}

/// DTO for creating a new listing. The store assigns `id` and
/// `created_at`; `is_sold` starts false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListing {
    pub title: String,
    pub category: Category,
    pub price: f64,
    pub description: String,
    pub location: String,
    pub category_fields: BTreeMap<String, String>,
    pub image_url: String,
    pub user_id: String,
    pub user_name: String,
}

/// DTO for a partial listing update. All fields are optional; absent
/// fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListing {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category_fields: Option<BTreeMap<String, String>>,
    pub image_url: Option<String>,
    pub is_sold: Option<bool>,
}
