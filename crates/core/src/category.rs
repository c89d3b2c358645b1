//! The closed category taxonomy.
//!
//! Every category carries, as data, the fixed ordered list of attribute
//! names a listing in that category must fill in. Unknown category ids
//! are a parse error rather than an empty requirement list.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Attribute names whose values must parse as numbers.
pub const NUMERIC_FIELDS: &[&str] = &["year", "km", "salary"];

/// A listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cars,
    Motorcycles,
    Mobiles,
    Properties,
    Jobs,
    Furniture,
    Fashion,
    Books,
}

/// All categories, in display order.
pub const ALL_CATEGORIES: &[Category] = &[
    Category::Cars,
    Category::Motorcycles,
    Category::Mobiles,
    Category::Properties,
    Category::Jobs,
    Category::Furniture,
    Category::Fashion,
    Category::Books,
];

impl Category {
    /// Parse a stable category id (`"cars"`, `"mobiles"`, ...).
    pub fn from_id(id: &str) -> Result<Self, CoreError> {
        match id {
            "cars" => Ok(Self::Cars),
            "motorcycles" => Ok(Self::Motorcycles),
            "mobiles" => Ok(Self::Mobiles),
            "properties" => Ok(Self::Properties),
            "jobs" => Ok(Self::Jobs),
            "furniture" => Ok(Self::Furniture),
            "fashion" => Ok(Self::Fashion),
            "books" => Ok(Self::Books),
            _ => Err(CoreError::Validation(format!(
                "Unknown category id '{id}'"
            ))),
        }
    }

    /// Stable id used in persisted documents.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Cars => "cars",
            Self::Motorcycles => "motorcycles",
            Self::Mobiles => "mobiles",
            Self::Properties => "properties",
            Self::Jobs => "jobs",
            Self::Furniture => "furniture",
            Self::Fashion => "fashion",
            Self::Books => "books",
        }
    }

    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cars => "Cars",
            Self::Motorcycles => "Motorcycles",
            Self::Mobiles => "Mobile Phones",
            Self::Properties => "Properties",
            Self::Jobs => "Jobs",
            Self::Furniture => "Furniture",
            Self::Fashion => "Fashion",
            Self::Books => "Books",
        }
    }

    /// The ordered list of attribute names this category requires.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Cars => &["brand", "model", "year", "km", "fuel"],
            Self::Motorcycles => &["brand", "model", "year", "km"],
            Self::Mobiles => &["brand", "model", "condition"],
            Self::Properties => &["type", "bedrooms", "furnishing", "area"],
            Self::Jobs => &["jobType", "experience", "salary"],
            Self::Furniture => &["type", "condition"],
            Self::Fashion => &["type", "brand", "condition"],
            Self::Books => &["title", "author", "condition"],
        }
    }

    /// Whether `field` is one of this category's required attributes.
    pub fn has_field(&self, field: &str) -> bool {
        self.required_fields().contains(&field)
    }
}

/// Display label for an attribute name, if it is a known attribute.
pub fn field_label(field: &str) -> Option<&'static str> {
    match field {
        "brand" => Some("Brand"),
        "model" => Some("Model"),
        "year" => Some("Year"),
        "km" => Some("KM Driven"),
        "fuel" => Some("Fuel Type"),
        "condition" => Some("Condition"),
        "type" => Some("Type"),
        "bedrooms" => Some("Bedrooms"),
        "furnishing" => Some("Furnishing"),
        "area" => Some("Area (sq ft)"),
        "jobType" => Some("Job Type"),
        "experience" => Some("Experience Required"),
        "salary" => Some("Salary"),
        "title" => Some("Book Title"),
        "author" => Some("Author"),
        _ => None,
    }
}

/// Whether values for `field` must parse as numbers.
pub fn is_numeric_field(field: &str) -> bool {
    NUMERIC_FIELDS.contains(&field)
}
