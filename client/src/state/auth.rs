//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `RwSignal<AuthState>` is provided by `App`, filled once from
//! `/api/auth/me`, and reset on sign-out. Route guards and the dashboard
//! greeting read it through context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use model::CurrentUser;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    pub loading: bool,
}

impl AuthState {
    /// State at app start, before `/api/auth/me` has answered.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    pub fn resolved(&mut self, user: Option<CurrentUser>) {
        self.user = user;
        self.loading = false;
    }

    pub fn signed_out(&mut self) {
        self.resolved(None);
    }

    /// `"Welcome back, Ada!"`, or `"Welcome back!"` when no name is known.
    #[must_use]
    pub fn greeting(&self) -> String {
        match self.user.as_ref().map(|u| u.display_name.trim()).filter(|n| !n.is_empty()) {
            Some(name) => format!("Welcome back, {name}!"),
            None => "Welcome back!".to_owned(),
        }
    }
}
