//! Trip-creation wizard state.
//!
//! DESIGN
//! ======
//! A linear three-step machine: `Basics -> Invitees -> Categories`. Every
//! transition is a method on [`WizardState`] so the page only binds inputs
//! and forwards clicks. Validation reuses the `model` rules the server
//! re-runs on submission.

#[cfg(test)]
#[path = "wizard_test.rs"]
mod wizard_test;

use model::validate::{validate_basics, validate_categories, validate_invitee};
use model::{CategoryDraft, CreateTripRequest, TripBasics, ValidationError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    Basics,
    Invitees,
    Categories,
}

impl WizardStep {
    pub const COUNT: u8 = 3;

    /// 1-based step number for the "Step N of 3" label.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Basics => 1,
            Self::Invitees => 2,
            Self::Categories => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Basics => "Trip Basics",
            Self::Invitees => "Invite People",
            Self::Categories => "Categories",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Basics => Self::Invitees,
            Self::Invitees | Self::Categories => Self::Categories,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Basics | Self::Invitees => Self::Basics,
            Self::Categories => Self::Invitees,
        }
    }
}

/// A category with its on/off checkbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryOption {
    pub draft: CategoryDraft,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub basics: TripBasics,
    pub invitee_input: String,
    pub invitees: Vec<String>,
    pub categories: Vec<CategoryOption>,
    pub custom_name: String,
    pub custom_icon: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Basics,
            basics: TripBasics::default(),
            invitee_input: String::new(),
            invitees: Vec::new(),
            categories: CategoryDraft::defaults()
                .into_iter()
                .map(|draft| CategoryOption { draft, enabled: true })
                .collect(),
            custom_name: String::new(),
            custom_icon: String::new(),
            error: None,
            submitting: false,
        }
    }
}

impl WizardState {
    /// Progress bar fill, in percent.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        u32::from(self.step.number()) * 100 / u32::from(WizardStep::COUNT)
    }

    /// Move forward; leaving `Basics` requires valid basics.
    /// Returns whether the step changed.
    pub fn next(&mut self) -> bool {
        if self.step == WizardStep::Basics {
            if let Err(e) = validate_basics(&self.basics) {
                self.error = Some(e.to_string());
                return false;
            }
        }
        let next = self.step.next();
        let moved = next != self.step;
        self.step = next;
        if moved {
            self.error = None;
        }
        moved
    }

    pub fn back(&mut self) {
        self.step = self.step.prev();
        self.error = None;
    }

    // =========================================================================
    // INVITEES
    // =========================================================================

    pub fn set_invitee_input(&mut self, value: String) {
        self.invitee_input = value;
        self.error = None;
    }

    /// Accept the typed email. Empty input is a no-op; a rejected email
    /// leaves the list and the input untouched.
    pub fn add_invitee(&mut self) {
        if self.invitee_input.trim().is_empty() {
            return;
        }
        match validate_invitee(&self.invitee_input, &self.invitees) {
            Ok(email) => {
                self.invitees.push(email);
                self.invitee_input.clear();
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn remove_invitee(&mut self, email: &str) {
        self.invitees.retain(|e| e != email);
    }

    // =========================================================================
    // CATEGORIES
    // =========================================================================

    pub fn toggle_category(&mut self, index: usize) {
        if let Some(option) = self.categories.get_mut(index) {
            option.enabled = !option.enabled;
        }
    }

    /// Append the typed custom category, enabled. A blank name is a no-op.
    pub fn add_custom_category(&mut self) {
        if self.custom_name.trim().is_empty() {
            return;
        }
        let draft = CategoryDraft::custom(&self.custom_name, &self.custom_icon);
        self.categories.push(CategoryOption { draft, enabled: true });
        self.custom_name.clear();
        self.custom_icon.clear();
    }

    #[must_use]
    pub fn enabled_categories(&self) -> Vec<CategoryDraft> {
        self.categories.iter().filter(|c| c.enabled).map(|c| c.draft.clone()).collect()
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    /// The request the wizard would submit right now.
    ///
    /// # Errors
    ///
    /// Returns the first failing basics or category rule.
    pub fn request(&self) -> Result<CreateTripRequest, ValidationError> {
        validate_basics(&self.basics)?;
        let categories = self.enabled_categories();
        validate_categories(&categories)?;
        Ok(CreateTripRequest { basics: self.basics.clone(), invitees: self.invitees.clone(), categories })
    }

    /// Validate and mark a submission in flight. Returns `None` (with the
    /// inline error set) when blocked or already submitting.
    pub fn begin_submit(&mut self) -> Option<CreateTripRequest> {
        if self.submitting {
            return None;
        }
        match self.request() {
            Ok(request) => {
                self.error = None;
                self.submitting = true;
                Some(request)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn submit_failed(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }
}
