//! Draft listing and wizard step machinery for the ad composer.
//!
//! A [`DraftListing`] accumulates everything the user enters across the
//! three wizard steps. The per-step rule sets here are pure: they report
//! every violation at once and mutate nothing, so the composer can gate
//! forward transitions on an empty [`ValidationErrors`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{self, Category};
use crate::error::CoreError;
use crate::validation::ValidationErrors;

// ---------------------------------------------------------------------------
// Wizard steps
// ---------------------------------------------------------------------------

/// Minimum title length (step 2).
pub const MIN_TITLE_LEN: usize = 3;

/// Minimum description length (step 3).
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 3;

/// The three steps of the ad-submission wizard.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    SelectCategory,
    EnterDetails,
    EnterMedia,
}

impl WizardStep {
    /// Convert a 1-based step number to a `WizardStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::SelectCategory),
            2 => Ok(Self::EnterDetails),
            3 => Ok(Self::EnterMedia),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::SelectCategory => 1,
            Self::EnterDetails => 2,
            Self::EnterMedia => 3,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::SelectCategory => "Choose a category",
            Self::EnterDetails => "Include some details",
            Self::EnterMedia => "Upload photos and add description",
        }
    }

    /// The step before this one, if any.
    pub fn back(self) -> Option<Self> {
        match self {
            Self::SelectCategory => None,
            Self::EnterDetails => Some(Self::SelectCategory),
            Self::EnterMedia => Some(Self::EnterDetails),
        }
    }

    /// The step after this one, if any.
    pub fn forward(self) -> Option<Self> {
        match self {
            Self::SelectCategory => Some(Self::EnterDetails),
            Self::EnterDetails => Some(Self::EnterMedia),
            Self::EnterMedia => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Draft listing
// ---------------------------------------------------------------------------

/// The in-progress, not-yet-persisted ad being composed.
///
/// Entered values survive backward navigation untouched; only the
/// composer clears them, on successful submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftListing {
    /// Selected category; set by the step-1 pick.
    pub category: Option<Category>,
    pub title: String,
    /// Raw price input; parsed during step-2 validation.
    pub price: String,
    /// Category attribute values, keyed by required-attribute name.
    pub attributes: BTreeMap<String, String>,
    pub description: String,
    pub location: String,
    /// Raw uploaded image bytes; normalized only at submit time.
    pub image: Option<Vec<u8>>,
}

impl DraftListing {
    /// Set a category attribute value.
    ///
    /// Only attribute names the selected category requires are accepted,
    /// keeping the draft's key set exactly the category's required list.
    pub fn set_attribute(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        let category = self.category.ok_or_else(|| {
            CoreError::Validation("Select a category before entering attributes".to_string())
        })?;
        if !category.has_field(field) {
            return Err(CoreError::Validation(format!(
                "Unknown attribute '{field}' for category {}",
                category.name()
            )));
        }
        self.attributes.insert(field.to_string(), value.into());
        Ok(())
    }

    /// The price input parsed as a number, if it parses.
    pub fn parsed_price(&self) -> Option<f64> {
        self.price.trim().parse::<f64>().ok()
    }

    /// Step-2 rule set: title, price, and every required attribute of the
    /// selected category. All violations are collected.
    pub fn validate_details(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title", "Title is required");
        } else if title.chars().count() < MIN_TITLE_LEN {
            errors.insert(
                "title",
                format!("Title must be at least {MIN_TITLE_LEN} characters"),
            );
        }

        let price = self.price.trim();
        if price.is_empty() {
            errors.insert("price", "Price is required");
        } else {
            match price.parse::<f64>() {
                Ok(value) if value > 0.0 => {}
                _ => errors.insert("price", "Enter a valid positive number"),
            }
        }

        if let Some(cat) = self.category {
            for &field in cat.required_fields() {
                let label = category::field_label(field).unwrap_or(field);
                match self.attributes.get(field).map(|v| v.trim()) {
                    None | Some("") => {
                        errors.insert(field, format!("{label} is required"));
                    }
                    Some(value)
                        if category::is_numeric_field(field)
                            && value.parse::<f64>().is_err() =>
                    {
                        errors.insert(field, format!("{label} must be a number"));
                    }
                    _ => {}
                }
            }
        }

        errors
    }

    /// Step-3 rule set: description, image, location. All violations are
    /// collected.
    pub fn validate_media(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert("description", "Description is required");
        } else if description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.insert(
                "description",
                format!("Description must be at least {MIN_DESCRIPTION_LEN} characters"),
            );
        }

        if self.image.is_none() {
            errors.insert("images", "Please upload image");
        }

        if self.location.trim().is_empty() {
            errors.insert("location", "Location is required");
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobiles_draft() -> DraftListing {
        let mut draft = DraftListing {
            category: Some(Category::Mobiles),
            title: "iPhone 12".to_string(),
            price: "25000".to_string(),
            ..Default::default()
        };
        draft.set_attribute("brand", "Apple").unwrap();
        draft.set_attribute("model", "12").unwrap();
        draft.set_attribute("condition", "Used").unwrap();
        draft
    }

    // -- WizardStep --

    #[test]
    fn step_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            assert_eq!(WizardStep::from_number(n).unwrap().to_number(), n);
        }
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(4).is_err());
    }

    #[test]
    fn step_back_and_forward() {
        assert_eq!(WizardStep::SelectCategory.back(), None);
        assert_eq!(
            WizardStep::EnterMedia.back(),
            Some(WizardStep::EnterDetails)
        );
        assert_eq!(
            WizardStep::SelectCategory.forward(),
            Some(WizardStep::EnterDetails)
        );
        assert_eq!(WizardStep::EnterMedia.forward(), None);
    }

    // -- set_attribute --

    #[test]
    fn set_attribute_requires_category() {
        let mut draft = DraftListing::default();
        assert!(draft.set_attribute("brand", "Apple").is_err());
    }

    #[test]
    fn set_attribute_rejects_unknown_field() {
        let mut draft = DraftListing {
            category: Some(Category::Mobiles),
            ..Default::default()
        };
        assert!(draft.set_attribute("fuel", "Petrol").is_err());
        assert!(draft.attributes.is_empty());
    }

    // -- validate_details --

    #[test]
    fn details_pass_for_complete_mobiles_draft() {
        let errors = mobiles_draft().validate_details();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn details_collect_all_violations_at_once() {
        let draft = DraftListing {
            category: Some(Category::Mobiles),
            ..Default::default()
        };
        let errors = draft.validate_details();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("price"), Some("Price is required"));
        assert_eq!(errors.get("brand"), Some("Brand is required"));
        assert_eq!(errors.get("model"), Some("Model is required"));
        assert_eq!(errors.get("condition"), Some("Condition is required"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn details_title_minimum_length() {
        let mut draft = mobiles_draft();
        draft.title = "ab".to_string();
        let errors = draft.validate_details();
        assert_eq!(
            errors.get("title"),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn details_price_must_be_positive() {
        let mut draft = mobiles_draft();
        for bad in ["0", "-5", "abc"] {
            draft.price = bad.to_string();
            let errors = draft.validate_details();
            assert_eq!(
                errors.get("price"),
                Some("Enter a valid positive number"),
                "price input {bad:?}"
            );
        }
    }

    #[test]
    fn details_numeric_attributes_must_parse() {
        let mut draft = DraftListing {
            category: Some(Category::Cars),
            title: "Honda City".to_string(),
            price: "450000".to_string(),
            ..Default::default()
        };
        draft.set_attribute("brand", "Honda").unwrap();
        draft.set_attribute("model", "City").unwrap();
        draft.set_attribute("year", "twenty twenty").unwrap();
        draft.set_attribute("km", "42000").unwrap();
        draft.set_attribute("fuel", "Petrol").unwrap();
        let errors = draft.validate_details();
        assert_eq!(errors.get("year"), Some("Year must be a number"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn details_blank_attribute_counts_as_missing() {
        let mut draft = mobiles_draft();
        draft.set_attribute("condition", "   ").unwrap();
        let errors = draft.validate_details();
        assert_eq!(errors.get("condition"), Some("Condition is required"));
    }

    // -- validate_media --

    #[test]
    fn media_pass_with_image_description_location() {
        let draft = DraftListing {
            description: "Great condition, barely used".to_string(),
            location: "Mumbai".to_string(),
            image: Some(vec![0u8; 4]),
            ..Default::default()
        };
        assert!(draft.validate_media().is_empty());
    }

    #[test]
    fn media_missing_image_is_exactly_one_error() {
        let draft = DraftListing {
            description: "Great condition, barely used".to_string(),
            location: "Mumbai".to_string(),
            image: None,
            ..Default::default()
        };
        let errors = draft.validate_media();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("images"), Some("Please upload image"));
    }

    #[test]
    fn media_collects_all_violations() {
        let draft = DraftListing {
            description: "too short".to_string(),
            ..Default::default()
        };
        let errors = draft.validate_media();
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters")
        );
        assert_eq!(errors.get("images"), Some("Please upload image"));
        assert_eq!(errors.get("location"), Some("Location is required"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn parsed_price_handles_whitespace() {
        let draft = DraftListing {
            price: " 25000 ".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.parsed_price(), Some(25000.0));
    }
}
