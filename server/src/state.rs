//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds only the backend handle; the server itself keeps no session or trip
//! data between requests.

use std::sync::Arc;

use crate::backend::Backend;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::backend::memory::MemoryBackend;
    use crate::backend::{AccessToken, Identity};

    /// `AppState` over a fresh in-memory backend; the backend is returned for
    /// seeding and call-log assertions.
    #[must_use]
    pub fn memory_app_state() -> (AppState, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::recording());
        (AppState::new(backend.clone()), backend)
    }

    /// Memory-backed state with one signed-in user.
    pub async fn signed_in_app_state() -> (AppState, Arc<MemoryBackend>, Identity, AccessToken) {
        let (state, backend) = memory_app_state();
        let user = backend.add_user("ada@example.com", "pw", Some("Ada")).await;
        let token = backend.issue_token(&user.id).await;
        (state, backend, user, token)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
