use super::*;

fn basics(name: &str, destination: &str, start: &str, end: &str) -> TripBasics {
    TripBasics {
        name: name.to_owned(),
        destination: destination.to_owned(),
        start_date: start.to_owned(),
        end_date: end.to_owned(),
        description: String::new(),
    }
}

// =============================================================================
// validate_basics
// =============================================================================

#[test]
fn basics_accepts_a_week_long_trip() {
    assert_eq!(validate_basics(&basics("Beach", "Miami", "2025-06-01", "2025-06-07")), Ok(()));
}

#[test]
fn basics_reports_first_missing_field_in_form_order() {
    assert_eq!(validate_basics(&basics(" ", "", "", "")), Err(ValidationError::NameRequired));
    assert_eq!(validate_basics(&basics("Beach", " ", "", "")), Err(ValidationError::DestinationRequired));
    assert_eq!(validate_basics(&basics("Beach", "Miami", "", "")), Err(ValidationError::StartDateRequired));
    assert_eq!(
        validate_basics(&basics("Beach", "Miami", "2025-06-01", "")),
        Err(ValidationError::EndDateRequired)
    );
}

#[test]
fn basics_rejects_end_equal_to_start() {
    assert_eq!(
        validate_basics(&basics("Beach", "Miami", "2025-06-01", "2025-06-01")),
        Err(ValidationError::EndNotAfterStart)
    );
}

#[test]
fn basics_rejects_end_before_start_across_years() {
    for (start, end) in [("2025-06-02", "2025-06-01"), ("2026-01-01", "2025-12-31"), ("2025-07-01", "2025-06-30")] {
        assert_eq!(
            validate_basics(&basics("Beach", "Miami", start, end)),
            Err(ValidationError::EndNotAfterStart),
            "{start} -> {end}"
        );
    }
}

#[test]
fn basics_rejects_unparseable_dates() {
    assert_eq!(
        validate_basics(&basics("Beach", "Miami", "06/01/2025", "2025-06-07")),
        Err(ValidationError::StartDateInvalid)
    );
    assert_eq!(
        validate_basics(&basics("Beach", "Miami", "2025-06-01", "2025-02-30")),
        Err(ValidationError::EndDateInvalid)
    );
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(ValidationError::EndNotAfterStart.to_string(), "End date must be after start date");
    assert_eq!(ValidationError::DuplicateEmail.to_string(), "This email has already been added");
    assert_eq!(ValidationError::NoCategories.to_string(), "Please select at least one category");
}

// =============================================================================
// Emails
// =============================================================================

#[test]
fn email_shape_accepts_local_at_domain_tld() {
    for ok in ["a@b.co", "first.last@example.com", "x+tag@sub.domain.org"] {
        assert!(is_valid_email(ok), "{ok}");
    }
}

#[test]
fn email_shape_rejects_malformed_addresses() {
    for bad in ["", "plain", "a@b", "@b.com", "a@.", "a b@c.com", "a@b c.com", "a@@b.com", "a@b.com "] {
        assert!(!is_valid_email(bad), "{bad:?}");
    }
}

#[test]
fn invitee_is_normalized_before_checks() {
    assert_eq!(validate_invitee("  Friend@Example.COM ", &[]), Ok("friend@example.com".to_owned()));
}

#[test]
fn invitee_duplicate_after_normalization_is_rejected() {
    let existing = vec!["friend@example.com".to_owned()];
    assert_eq!(validate_invitee("FRIEND@example.com", &existing), Err(ValidationError::DuplicateEmail));
}

#[test]
fn invitee_list_rejects_internal_duplicates() {
    let list = vec!["a@b.com".to_owned(), "A@B.com".to_owned()];
    assert_eq!(validate_invitees(&list), Err(ValidationError::DuplicateEmail));
}

// =============================================================================
// Categories / tasks / credentials
// =============================================================================

#[test]
fn categories_require_at_least_one() {
    assert_eq!(validate_categories(&[]), Err(ValidationError::NoCategories));
    assert_eq!(validate_categories(&CategoryDraft::defaults()), Ok(()));
}

#[test]
fn categories_reject_blank_names() {
    let drafts = vec![CategoryDraft { name: "  ".into(), icon: "🏠".into() }];
    assert_eq!(validate_categories(&drafts), Err(ValidationError::CategoryNameRequired));
}

#[test]
fn task_title_is_trimmed_and_required() {
    assert_eq!(validate_task_title("  Ferry "), Ok("Ferry".to_owned()));
    assert_eq!(validate_task_title("   "), Err(ValidationError::TitleRequired));
}

#[test]
fn credentials_checked_in_form_order() {
    assert_eq!(validate_credentials(" ", ""), Err(ValidationError::EmailRequired));
    assert_eq!(validate_credentials("nope", ""), Err(ValidationError::InvalidEmail));
    assert_eq!(validate_credentials("a@b.com", ""), Err(ValidationError::PasswordRequired));
    assert_eq!(validate_credentials("a@b.com", "pw"), Ok(()));
}

#[test]
fn blank_to_none_trims() {
    assert_eq!(blank_to_none("  "), None);
    assert_eq!(blank_to_none(" x "), Some("x".to_owned()));
}
