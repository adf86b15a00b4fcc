use super::*;

fn ada() -> CurrentUser {
    CurrentUser { id: "u1".to_owned(), email: Some("ada@example.com".to_owned()), display_name: "Ada".to_owned() }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(!state.loading);
}

#[test]
fn pending_state_is_loading() {
    let state = AuthState::pending();
    assert!(state.loading);
    assert!(state.user.is_none());
}

// =============================================================
// Transitions
// =============================================================

#[test]
fn resolved_stores_user_and_stops_loading() {
    let mut state = AuthState::pending();
    state.resolved(Some(ada()));
    assert_eq!(state.user, Some(ada()));
    assert!(!state.loading);
}

#[test]
fn signed_out_clears_user() {
    let mut state = AuthState::pending();
    state.resolved(Some(ada()));
    state.signed_out();
    assert!(state.user.is_none());
    assert!(!state.loading);
}

// =============================================================
// Greeting
// =============================================================

#[test]
fn greeting_includes_display_name() {
    let mut state = AuthState::default();
    state.resolved(Some(ada()));
    assert_eq!(state.greeting(), "Welcome back, Ada!");
}

#[test]
fn greeting_omits_blank_name() {
    let mut user = ada();
    user.display_name = "  ".to_owned();
    let state = AuthState { user: Some(user), loading: false };
    assert_eq!(state.greeting(), "Welcome back!");
}
