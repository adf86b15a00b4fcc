//! Auth routes: credential sign-in, sign-out, and the current user.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use model::{CurrentUser, LoginRequest};
use time::Duration;

use super::ApiError;
use crate::backend::{AccessToken, Identity};
use crate::services::session;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("BACKEND_URL")
        .map(|url| url.trim().starts_with("https://"))
        .unwrap_or(false)
}

fn session_cookie(value: String) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(cookie_secure())
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub identity: Identity,
    pub token: AccessToken,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthorized());
        }

        let app_state = AppState::from_ref(state);
        let token = AccessToken::new(token);
        let identity = session::resolve_session(app_state.backend.as_ref(), Some(&token))
            .await
            .ok_or_else(ApiError::unauthorized)?;

        Ok(Self { identity, token })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: validate, sign in, set cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<CurrentUser>), ApiError> {
    let (token, identity) = session::sign_in(state.backend.as_ref(), &req).await?;
    let jar = jar.add(session_cookie(token.as_str().to_owned()));
    Ok((jar, Json(session::current_user(&identity))))
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<CurrentUser> {
    Json(session::current_user(&auth.identity))
}

/// `POST /api/auth/logout`: revoke the backend session, clear cookie.
///
/// Succeeds without a cookie so a stale client can always sign out.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = jar.get(COOKIE_NAME).map(Cookie::value).filter(|t| !t.is_empty()) {
        session::sign_out(state.backend.as_ref(), &AccessToken::new(token)).await;
    }

    let mut cookie = session_cookie(String::new());
    cookie.set_max_age(Duration::ZERO);
    (jar.add(cookie), StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
