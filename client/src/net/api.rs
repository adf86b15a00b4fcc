//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`RequestError`] carrying the HTTP status (when one
//! was received) and the server's `{"error": "..."}` message, so pages can
//! tell a missing trip from a foreign one. Every failure is logged with
//! `log::error!` before it is returned.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use model::{CategoryBoard, CreateTripRequest, CurrentUser, LoginRequest, NewTask, Task, TaskPatch, Trip, TripDetail};

/// A failed API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestError {
    /// `None` when the request never produced a response.
    pub status: Option<u16>,
    pub message: String,
}

impl RequestError {
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: None, message: message.into() }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status == Some(403)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn trip_endpoint(trip_id: &str) -> String {
    format!("/api/trips/{trip_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn category_board_endpoint(trip_id: &str, category_id: &str) -> String {
    format!("/api/trips/{trip_id}/categories/{category_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn category_tasks_endpoint(category_id: &str) -> String {
    format!("/api/categories/{category_id}/tasks")
}

#[cfg(any(test, feature = "hydrate"))]
fn task_endpoint(task_id: &str) -> String {
    format!("/api/tasks/{task_id}")
}

/// Build a [`RequestError`] from a non-2xx status and its body text.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_body(status: u16, body: &str) -> RequestError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("request failed: {status}"));
    RequestError { status: Some(status), message }
}

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use super::{RequestError, error_from_body};

    fn transport(e: impl std::fmt::Display) -> RequestError {
        RequestError::transport(e.to_string())
    }

    async fn check(resp: Response) -> Result<Response, RequestError> {
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(error_from_body(status, &body))
    }

    pub(super) async fn send(builder: RequestBuilder) -> Result<Response, RequestError> {
        let resp = builder.send().await.map_err(transport)?;
        check(resp).await
    }

    pub(super) async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, RequestError> {
        let resp = builder.json(body).map_err(transport)?.send().await.map_err(transport)?;
        check(resp).await
    }

    pub(super) async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, RequestError> {
        let resp = send(Request::get(url)).await?;
        resp.json::<T>().await.map_err(transport)
    }

    pub(super) async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, RequestError> {
        let resp = send_json(Request::post(url), body).await?;
        resp.json::<T>().await.map_err(transport)
    }

    pub(super) fn post(url: &str) -> RequestBuilder {
        Request::post(url)
    }

    pub(super) fn patch(url: &str) -> RequestBuilder {
        Request::patch(url)
    }

    pub(super) fn delete(url: &str) -> RequestBuilder {
        Request::delete(url)
    }
}

#[cfg(feature = "hydrate")]
fn logged<T>(what: &str, result: Result<T, RequestError>) -> Result<T, RequestError> {
    if let Err(e) = &result {
        log::error!("{what} failed: status={:?} error={}", e.status, e.message);
    }
    result
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, RequestError> {
    Err(RequestError::transport("not available on server"))
}

// =============================================================================
// AUTH
// =============================================================================

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<CurrentUser> {
    #[cfg(feature = "hydrate")]
    {
        http::get_json::<CurrentUser>("/api/auth/me").await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in via `POST /api/auth/login`; the server sets the session cookie.
///
/// # Errors
///
/// Returns the server's message (validation or backend rejection).
pub async fn login(request: &LoginRequest) -> Result<CurrentUser, RequestError> {
    #[cfg(feature = "hydrate")]
    {
        logged("login", http::post_json("/api/auth/login", request).await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        unavailable()
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = logged("logout", http::send(http::post("/api/auth/logout")).await);
    }
}

// =============================================================================
// TRIPS
// =============================================================================

/// Trips visible to the signed-in user, ascending by start date.
///
/// # Errors
///
/// Returns the request failure.
pub async fn list_trips() -> Result<Vec<Trip>, RequestError> {
    #[cfg(feature = "hydrate")]
    {
        logged("list trips", http::get_json("/api/trips").await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        unavailable()
    }
}

/// Submit the wizard; returns the new trip id.
///
/// # Errors
///
/// Returns the server's message, e.g. `Failed to create categories: ...`.
pub async fn create_trip(request: &CreateTripRequest) -> Result<String, RequestError> {
    #[cfg(feature = "hydrate")]
    {
        let created = http::post_json::<_, model::CreateTripResponse>("/api/trips", request).await;
        logged("create trip", created.map(|r| r.trip_id))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        unavailable()
    }
}

/// Trip detail aggregate for `/trips/{id}`.
///
/// # Errors
///
/// `404` for a missing trip, `403` for a trip the user is not a member of.
pub async fn fetch_trip_detail(trip_id: &str) -> Result<TripDetail, RequestError> {
    #[cfg(feature = "hydrate")]
    {
        let url = trip_endpoint(trip_id);
        logged("load trip", http::get_json(&url).await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = trip_id;
        unavailable()
    }
}

/// Task board aggregate for one category.
///
/// # Errors
///
/// `404` with "Category not found" or "Trip not found".
pub async fn fetch_category_board(trip_id: &str, category_id: &str) -> Result<CategoryBoard, RequestError> {
    #[cfg(feature = "hydrate")]
    {
        let url = category_board_endpoint(trip_id, category_id);
        logged("load category board", http::get_json(&url).await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (trip_id, category_id);
        unavailable()
    }
}

// =============================================================================
// TASKS
// =============================================================================

/// Create a task in a category.
///
/// # Errors
///
/// Returns the request failure.
pub async fn create_task(category_id: &str, task: &NewTask) -> Result<Task, RequestError> {
    #[cfg(feature = "hydrate")]
    {
        let url = category_tasks_endpoint(category_id);
        logged("create task", http::post_json(&url, task).await)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (category_id, task);
        unavailable()
    }
}

/// Write one task column.
///
/// # Errors
///
/// Returns the request failure.
pub async fn update_task(task_id: &str, patch: &TaskPatch) -> Result<(), RequestError> {
    #[cfg(feature = "hydrate")]
    {
        let url = task_endpoint(task_id);
        logged("update task", http::send_json(http::patch(&url), patch).await.map(|_| ()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (task_id, patch);
        unavailable()
    }
}

/// Delete a task.
///
/// # Errors
///
/// Returns the request failure.
pub async fn delete_task(task_id: &str) -> Result<(), RequestError> {
    #[cfg(feature = "hydrate")]
    {
        let url = task_endpoint(task_id);
        logged("delete task", http::send(http::delete(&url)).await.map(|_| ()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = task_id;
        unavailable()
    }
}
