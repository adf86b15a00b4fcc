//! Form validation rules shared by the wizard, login form, and server.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client runs these rules to block a view transition with an inline
//! message; the server runs the same rules before issuing any backend call.
//! Messages are user-facing and rendered verbatim.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;
use time::Date;
use time::macros::format_description;

use crate::payload::{CategoryDraft, TripBasics};

/// A rejected form input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Trip name is required")]
    NameRequired,
    #[error("Destination is required")]
    DestinationRequired,
    #[error("Start date is required")]
    StartDateRequired,
    #[error("End date is required")]
    EndDateRequired,
    #[error("Start date is invalid")]
    StartDateInvalid,
    #[error("End date is invalid")]
    EndDateInvalid,
    #[error("End date must be after start date")]
    EndNotAfterStart,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("This email has already been added")]
    DuplicateEmail,
    #[error("Please select at least one category")]
    NoCategories,
    #[error("Category name is required")]
    CategoryNameRequired,
    #[error("Task title is required")]
    TitleRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Password is required")]
    PasswordRequired,
}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // `local@domain.tld`, no whitespace, exactly one `@` per side.
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| unreachable!("static email pattern: {e}"))
});

/// Whether `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Trim and lower-case an email for comparison and storage.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse a `YYYY-MM-DD` day.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Validate the wizard's first step. Checks run in form order so the first
/// missing field is the one reported.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_basics(basics: &TripBasics) -> Result<(), ValidationError> {
    if basics.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if basics.destination.trim().is_empty() {
        return Err(ValidationError::DestinationRequired);
    }
    if basics.start_date.trim().is_empty() {
        return Err(ValidationError::StartDateRequired);
    }
    if basics.end_date.trim().is_empty() {
        return Err(ValidationError::EndDateRequired);
    }
    let start = parse_date(&basics.start_date).ok_or(ValidationError::StartDateInvalid)?;
    let end = parse_date(&basics.end_date).ok_or(ValidationError::EndDateInvalid)?;
    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }
    Ok(())
}

/// Validate one invitee against the already-accepted list.
///
/// Returns the normalized email on success.
///
/// # Errors
///
/// [`ValidationError::InvalidEmail`] for a malformed address,
/// [`ValidationError::DuplicateEmail`] when it is already in `existing`.
pub fn validate_invitee(raw: &str, existing: &[String]) -> Result<String, ValidationError> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    if existing.iter().any(|e| *e == email) {
        return Err(ValidationError::DuplicateEmail);
    }
    Ok(email)
}

/// Validate a full invitee list (server side re-check of the wizard's list).
///
/// # Errors
///
/// Returns the first malformed or duplicated address.
pub fn validate_invitees(emails: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut accepted = Vec::with_capacity(emails.len());
    for raw in emails {
        let email = validate_invitee(raw, &accepted)?;
        accepted.push(email);
    }
    Ok(accepted)
}

/// Validate the categories that will be created with a trip.
///
/// # Errors
///
/// [`ValidationError::NoCategories`] for an empty set,
/// [`ValidationError::CategoryNameRequired`] for a blank name.
pub fn validate_categories(categories: &[CategoryDraft]) -> Result<(), ValidationError> {
    if categories.is_empty() {
        return Err(ValidationError::NoCategories);
    }
    if categories.iter().any(|c| c.name.trim().is_empty()) {
        return Err(ValidationError::CategoryNameRequired);
    }
    Ok(())
}

/// Validate and trim a task title.
///
/// # Errors
///
/// [`ValidationError::TitleRequired`] when the title is blank.
pub fn validate_task_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    Ok(title.to_owned())
}

/// Validate the sign-in form before contacting the backend.
///
/// # Errors
///
/// Returns the first failing rule in form order.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

/// Map an empty or whitespace-only optional input to `None`.
#[must_use]
pub fn blank_to_none(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
