use super::*;
use crate::backend::memory::{INVALID_CREDENTIALS, MemoryBackend};

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest { email: email.to_owned(), password: password.to_owned() }
}

// =============================================================================
// tokens
// =============================================================================

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a, 0xff]), "0aff");
}

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// sign_in
// =============================================================================

#[tokio::test]
async fn sign_in_validates_before_calling_backend() {
    let backend = MemoryBackend::recording().with_user("ada@example.com", "pw", None);
    let err = sign_in(&backend, &login("", "pw")).await.unwrap_err();
    assert!(matches!(err, AuthError::Invalid(ValidationError::EmailRequired)));
    let err = sign_in(&backend, &login("not-an-email", "pw")).await.unwrap_err();
    assert!(matches!(err, AuthError::Invalid(ValidationError::InvalidEmail)));
    let err = sign_in(&backend, &login("ada@example.com", "")).await.unwrap_err();
    assert!(matches!(err, AuthError::Invalid(ValidationError::PasswordRequired)));
}

#[tokio::test]
async fn sign_in_surfaces_backend_message() {
    let backend = MemoryBackend::recording().with_user("ada@example.com", "pw", None);
    let err = sign_in(&backend, &login("ada@example.com", "wrong")).await.unwrap_err();
    assert_eq!(err.to_string(), INVALID_CREDENTIALS);
}

#[tokio::test]
async fn sign_in_returns_token_that_resolves() {
    let backend = MemoryBackend::recording().with_user("ada@example.com", "pw", Some("Ada"));
    let (token, identity) = sign_in(&backend, &login(" ada@example.com ", "pw")).await.unwrap();
    let resolved = resolve_session(&backend, Some(&token)).await.unwrap();
    assert_eq!(resolved, identity);
    assert_eq!(current_user(&resolved).display_name, "Ada");
}

// =============================================================================
// resolve_session / sign_out
// =============================================================================

#[tokio::test]
async fn resolve_without_token_is_none() {
    let backend = MemoryBackend::recording();
    assert_eq!(resolve_session(&backend, None).await, None);
}

#[tokio::test]
async fn resolve_unknown_token_is_none() {
    let backend = MemoryBackend::recording();
    assert_eq!(resolve_session(&backend, Some(&AccessToken::new("nope"))).await, None);
}

#[tokio::test]
async fn sign_out_ends_the_session() {
    let backend = MemoryBackend::recording().with_user("ada@example.com", "pw", None);
    let (token, _) = sign_in(&backend, &login("ada@example.com", "pw")).await.unwrap();
    sign_out(&backend, &token).await;
    assert_eq!(resolve_session(&backend, Some(&token)).await, None);
}

#[test]
fn current_user_uses_email_local_part_without_name() {
    let identity = Identity { id: "u1".into(), email: Some("bob@example.com".into()), full_name: None };
    let user = current_user(&identity);
    assert_eq!(user.display_name, "bob");
    assert_eq!(user.email.as_deref(), Some("bob@example.com"));
}
