//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and stitches it with Leptos SSR rendering
//! under a single Axum router. API errors are uniform JSON bodies
//! `{"error": "..."}`; each service error enum maps to a status in one small
//! function per enum.

pub mod auth;
pub mod tasks;
pub mod trips;

#[cfg(test)]
pub(crate) mod test_support;

use std::path::PathBuf;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::BackendError;
use crate::services::session::AuthError;
use crate::services::task::TaskError;
use crate::services::trip::TripError;
use crate::state::AppState;

// =============================================================================
// API ERROR
// =============================================================================

/// Error response: a status plus a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Not signed in")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), error = %self.message, "request failed");
        }
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

pub(crate) fn backend_error_to_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::Unauthorized => StatusCode::UNAUTHORIZED,
        _ => StatusCode::BAD_GATEWAY,
    }
}

pub(crate) fn auth_error_to_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Invalid(_) => StatusCode::BAD_REQUEST,
        AuthError::Rejected(_) => StatusCode::UNAUTHORIZED,
        AuthError::Backend(e) => backend_error_to_status(e),
    }
}

pub(crate) fn trip_error_to_status(err: &TripError) -> StatusCode {
    match err {
        TripError::Invalid(_) => StatusCode::BAD_REQUEST,
        TripError::NotFound => StatusCode::NOT_FOUND,
        TripError::Forbidden => StatusCode::FORBIDDEN,
        TripError::Step { .. } => StatusCode::BAD_GATEWAY,
        TripError::Backend(e) => backend_error_to_status(e),
    }
}

pub(crate) fn task_error_to_status(err: &TaskError) -> StatusCode {
    match err {
        TaskError::Invalid(_) => StatusCode::BAD_REQUEST,
        TaskError::CategoryNotFound | TaskError::TripNotFound => StatusCode::NOT_FOUND,
        TaskError::Backend(e) => backend_error_to_status(e),
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(auth_error_to_status(&err), err.to_string())
    }
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        Self::new(trip_error_to_status(&err), err.to_string())
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        Self::new(task_error_to_status(&err), err.to_string())
    }
}

// =============================================================================
// ROUTERS
// =============================================================================

/// JSON API routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/trips", get(trips::list_trips).post(trips::create_trip))
        .route("/api/trips/{id}", get(trips::trip_detail))
        .route("/api/trips/{id}/categories/{category_id}", get(trips::category_board))
        .route("/api/categories/{category_id}/tasks", post(tasks::create_task))
        .route("/api/tasks/{id}", patch(tasks::update_task).delete(tasks::delete_task))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes + Leptos SSR pages + static assets under `/pkg`.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section).
pub fn leptos_app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg"))))
}

/// Full application router; falls back to the API alone when Leptos
/// configuration is unavailable.
pub fn app(state: AppState) -> Router {
    match leptos_app(state.clone()) {
        Ok(router) => router,
        Err(e) => {
            tracing::warn!(error = %e, "leptos SSR disabled; serving API only");
            api_routes(state)
        }
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
