//! The three-step ad submission wizard.
//!
//! Drives the user through category selection (step 1), details entry
//! (step 2), and media & description entry (step 3), validating locally
//! before allowing forward progress, and producing exactly one persisted
//! listing per successful submission.
//!
//! Each field setter is accepted only on the step whose form owns the
//! field, so a draft can never reach submission with values the forward
//! gates have not validated. Backward navigation is always permitted,
//! clears the displayed errors, and leaves entered values untouched.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use mela_core::draft::{DraftListing, WizardStep};
use mela_core::{media, Category, CoreError, ValidationErrors};
use mela_store::{CreateListing, Listing};

use crate::error::{ClientError, ClientResult};
use crate::listings::ListingsService;
use crate::session::Session;

/// Wizard-owned mutable state.
#[derive(Debug, Default)]
struct ComposerState {
    step: WizardStep,
    draft: DraftListing,
    /// Errors currently displayed to the user; replaced on a failed
    /// forward transition, cleared on back navigation.
    errors: ValidationErrors,
}

/// The ad composer.
///
/// Interior-mutable so a rendered view can share one instance; the
/// submit path carries an explicit in-flight guard, so a second submit
/// racing the first fails with [`ClientError::Conflict`] instead of
/// creating a duplicate listing.
pub struct AdComposer {
    session: Session,
    listings: ListingsService,
    state: Mutex<ComposerState>,
    submit_in_flight: AtomicBool,
}

impl AdComposer {
    /// Create a composer at step 1 with an empty draft.
    pub fn new(session: Session, listings: ListingsService) -> Self {
        Self {
            session,
            listings,
            state: Mutex::new(ComposerState::default()),
            submit_in_flight: AtomicBool::new(false),
        }
    }

    /// Current wizard step.
    pub async fn step(&self) -> WizardStep {
        self.state.lock().await.step
    }

    /// Currently displayed field errors.
    pub async fn errors(&self) -> ValidationErrors {
        self.state.lock().await.errors.clone()
    }

    /// A copy of the draft, for previews and tests.
    pub async fn draft(&self) -> DraftListing {
        self.state.lock().await.draft.clone()
    }

    /// Pick a category and advance to step 2. Unconditional, but only
    /// available on step 1.
    ///
    /// Picking a different category than before discards previously
    /// entered attributes — the draft's attribute keys always match the
    /// selected category's required list.
    pub async fn select_category(&self, category: Category) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::SelectCategory {
            return Err(wrong_step(WizardStep::SelectCategory, state.step));
        }
        if state.draft.category != Some(category) {
            state.draft.attributes.clear();
        }
        state.draft.category = Some(category);
        state.step = WizardStep::EnterDetails;
        Ok(())
    }

    /// Set the ad title (step 2).
    pub async fn set_title(&self, title: impl Into<String>) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterDetails {
            return Err(wrong_step(WizardStep::EnterDetails, state.step));
        }
        state.draft.title = title.into();
        Ok(())
    }

    /// Set the raw price input (step 2).
    pub async fn set_price(&self, price: impl Into<String>) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterDetails {
            return Err(wrong_step(WizardStep::EnterDetails, state.step));
        }
        state.draft.price = price.into();
        Ok(())
    }

    /// Set one category attribute (step 2). Attribute names outside the
    /// selected category's required list are rejected.
    pub async fn set_attribute(
        &self,
        field: &str,
        value: impl Into<String>,
    ) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterDetails {
            return Err(wrong_step(WizardStep::EnterDetails, state.step));
        }
        state.draft.set_attribute(field, value)?;
        Ok(())
    }

    /// Set the description (step 3).
    pub async fn set_description(&self, description: impl Into<String>) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterMedia {
            return Err(wrong_step(WizardStep::EnterMedia, state.step));
        }
        state.draft.description = description.into();
        Ok(())
    }

    /// Set the location (step 3).
    pub async fn set_location(&self, location: impl Into<String>) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterMedia {
            return Err(wrong_step(WizardStep::EnterMedia, state.step));
        }
        state.draft.location = location.into();
        Ok(())
    }

    /// Attach the uploaded photo bytes (step 3). Replaces any previous
    /// upload; normalization happens at submit time.
    pub async fn attach_image(&self, bytes: Vec<u8>) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterMedia {
            return Err(wrong_step(WizardStep::EnterMedia, state.step));
        }
        state.draft.image = Some(bytes);
        Ok(())
    }

    /// Remove the uploaded photo (step 3).
    pub async fn remove_image(&self) -> ClientResult<()> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterMedia {
            return Err(wrong_step(WizardStep::EnterMedia, state.step));
        }
        state.draft.image = None;
        Ok(())
    }

    /// Advance from step 2 to step 3, gated on the step-2 rule set.
    ///
    /// On failure the composer stays at step 2, the collected errors are
    /// displayed and returned, and nothing else changes.
    pub async fn next(&self) -> ClientResult<WizardStep> {
        let mut state = self.state.lock().await;
        if state.step != WizardStep::EnterDetails {
            return Err(wrong_step(WizardStep::EnterDetails, state.step));
        }

        let errors = state.draft.validate_details();
        if !errors.is_empty() {
            state.errors = errors.clone();
            return Err(ClientError::Validation(errors));
        }

        state.errors.clear();
        state.step = WizardStep::EnterMedia;
        Ok(state.step)
    }

    /// Go back one step. Always permitted; clears displayed errors and
    /// keeps every entered value. At step 1 this is a no-op (leaving the
    /// flow entirely is the caller's navigation concern).
    pub async fn back(&self) -> WizardStep {
        let mut state = self.state.lock().await;
        if let Some(previous) = state.step.back() {
            state.step = previous;
        }
        state.errors.clear();
        state.step
    }

    /// Submit the completed draft as a new listing.
    ///
    /// Guarded by, in order: the in-flight flag, the authenticated-user
    /// precondition, the step-3 position, and the step-3 rule set. On
    /// success exactly one listing is created, the caller's catalog is
    /// refreshed, and the wizard resets to a clean step 1. On any
    /// failure the draft is preserved unchanged for manual retry.
    pub async fn submit(&self) -> ClientResult<Listing> {
        if self
            .submit_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClientError::Conflict(
                "A submission is already in progress".to_string(),
            ));
        }

        let result = self.submit_locked().await;
        self.submit_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn submit_locked(&self) -> ClientResult<Listing> {
        let user = self.session.current_user().await.ok_or_else(|| {
            ClientError::Unauthorized("Login is required to post an ad.".to_string())
        })?;

        // Validate and snapshot the draft, then release the lock for the
        // slow work (normalization, store round trip).
        let draft = {
            let mut state = self.state.lock().await;
            if state.step != WizardStep::EnterMedia {
                return Err(wrong_step(WizardStep::EnterMedia, state.step));
            }
            let errors = state.draft.validate_media();
            if !errors.is_empty() {
                state.errors = errors.clone();
                return Err(ClientError::Validation(errors));
            }
            state.errors.clear();
            state.draft.clone()
        };

        let category = draft.category.ok_or_else(|| {
            ClientError::Conflict("No category selected".to_string())
        })?;
        let price = draft.parsed_price().ok_or_else(|| {
            ClientError::Core(CoreError::Internal(
                "draft price missing after validation".to_string(),
            ))
        })?;
        let image = draft.image.as_deref().ok_or_else(|| {
            ClientError::Core(CoreError::Internal(
                "draft image missing after validation".to_string(),
            ))
        })?;

        // Normalization runs once per submission, at submit time.
        let image_url = media::normalize_image(image, media::TARGET_WIDTH)
            .map_err(ClientError::Core)?;

        let input = CreateListing {
            title: draft.title,
            category,
            price,
            description: draft.description,
            location: draft.location,
            category_fields: draft.attributes,
            image_url,
            user_id: user.uid.clone(),
            user_name: user.name().to_string(),
        };

        let listing = self
            .session
            .store()
            .create_listing(input)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create listing");
                ClientError::Store(e)
            })?;
        tracing::info!(listing_id = %listing.id, uid = %user.uid, "listing created");

        // Reset before refreshing so a rendered caller sees a clean slate.
        self.reset().await;
        self.listings.refresh().await;

        Ok(listing)
    }

    /// Clear the draft and return to step 1. Idempotent.
    pub async fn reset(&self) {
        *self.state.lock().await = ComposerState::default();
    }
}

fn wrong_step(expected: WizardStep, actual: WizardStep) -> ClientError {
    ClientError::Conflict(format!(
        "This action belongs to step {} ({}), but the wizard is at step {}",
        expected.to_number(),
        expected.label(),
        actual.to_number(),
    ))
}
