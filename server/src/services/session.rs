//! Session resolution, sign-in, and sign-out.
//!
//! ARCHITECTURE
//! ============
//! The backend's auth service issues the access token; the server keeps it in
//! an HttpOnly cookie and resolves it to an identity on every protected
//! request. Nothing about the session is stored server side.
//!
//! ERROR HANDLING
//! ==============
//! Resolution is forgiving: an unknown token and a failing auth call both
//! mean "no identity", and the failure is only logged. Sign-in is strict:
//! credentials are validated locally before any call, and a backend rejection
//! surfaces the backend's own message.

use std::fmt::Write;

use model::{CurrentUser, LoginRequest, ValidationError, validate};
use rand::Rng;

use crate::backend::{AccessToken, Backend, BackendError, Identity};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The backend refused the credentials.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Backend(BackendError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected { message, .. } => Self::Rejected(message),
            BackendError::Unauthorized => Self::Rejected("Invalid login credentials".to_owned()),
            other => Self::Backend(other),
        }
    }
}

/// Wire view of an identity.
#[must_use]
pub fn current_user(identity: &Identity) -> CurrentUser {
    CurrentUser { id: identity.id.clone(), email: identity.email.clone(), display_name: identity.display_name() }
}

/// Identity behind `token`; `None` for a missing token, an unknown token, or
/// a failing backend call.
pub async fn resolve_session(backend: &dyn Backend, token: Option<&AccessToken>) -> Option<Identity> {
    let token = token?;
    match backend.current_identity(token).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = %e, "session resolution failed");
            None
        }
    }
}

/// Validate credentials, then exchange them for a session.
///
/// # Errors
///
/// Returns [`AuthError::Invalid`] before any backend call when the form is
/// incomplete, [`AuthError::Rejected`] with the backend's message when the
/// credentials are refused.
pub async fn sign_in(backend: &dyn Backend, req: &LoginRequest) -> Result<(AccessToken, Identity), AuthError> {
    validate::validate_credentials(&req.email, &req.password)?;
    let session = backend.sign_in(req.email.trim(), &req.password).await?;
    tracing::info!(user_id = %session.identity.id, "signed in");
    Ok((session.access_token, session.identity))
}

/// Revoke the token. Failure is logged and ignored.
pub async fn sign_out(backend: &dyn Backend, token: &AccessToken) {
    if let Err(e) = backend.sign_out(token).await {
        tracing::warn!(error = %e, "backend sign-out failed");
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
