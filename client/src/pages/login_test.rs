use super::*;

#[test]
fn login_request_trims_email_and_keeps_password() {
    assert_eq!(
        login_request("  ada@example.com ", " pw "),
        Ok(LoginRequest { email: "ada@example.com".to_owned(), password: " pw ".to_owned() })
    );
}

#[test]
fn login_request_checks_in_form_order() {
    assert_eq!(login_request("   ", ""), Err(ValidationError::EmailRequired));
    assert_eq!(login_request("ada", ""), Err(ValidationError::InvalidEmail));
    assert_eq!(login_request("ada@example.com", ""), Err(ValidationError::PasswordRequired));
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(login_request("", "pw").unwrap_err().to_string(), "Email is required");
    assert_eq!(login_request("nope", "pw").unwrap_err().to_string(), "Please enter a valid email address");
    assert_eq!(login_request("a@b.co", "").unwrap_err().to_string(), "Password is required");
}
