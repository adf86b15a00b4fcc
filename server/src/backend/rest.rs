//! HTTP client for the hosted backend (GoTrue auth + PostgREST tables).
//!
//! Thin wrapper: every request carries the project's anon key as `apikey`
//! and the caller's token as `Authorization: Bearer`, so the backend's
//! row-level policies see the real user. Response parsing is split into pure
//! functions for testability.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`BackendError::Rejected`] carrying the backend's
//! own message text (`message`, `msg`, `error_description`, or `error`, in
//! that order), so callers can surface it verbatim. A 401 from the auth
//! service maps to [`BackendError::Unauthorized`].

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{AccessToken, AuthSession, Backend, BackendError, Identity, Query, Row, Table};
use crate::config::RestConfig;

// =============================================================================
// CLIENT
// =============================================================================

pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestBackend {
    /// Build a client for the backend at `config.url`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::HttpClientBuild`] if the TLS stack cannot be
    /// initialized.
    pub fn new(config: &RestConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.url.trim_end_matches('/').to_owned(), anon_key: config.anon_key.clone() })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table.as_str())
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn request(&self, method: Method, url: &str, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await.map_err(|e| BackendError::Transport(e.to_string()))?;
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "backend rejected request");
        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }
        Err(BackendError::Rejected { status: status.as_u16(), message: error_message(status, &body) })
    }

    async fn body_text(response: Response) -> Result<String, BackendError> {
        response.text().await.map_err(|e| BackendError::Transport(e.to_string()))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Value,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

#[derive(serde::Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

fn identity_from(user: AuthUser) -> Identity {
    let full_name = user
        .user_metadata
        .get("full_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned);
    Identity { id: user.id, email: user.email, full_name }
}

fn parse_user(json: &str) -> Result<Identity, BackendError> {
    let user: AuthUser = serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok(identity_from(user))
}

fn parse_token(json: &str) -> Result<AuthSession, BackendError> {
    let token: TokenResponse = serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok(AuthSession { access_token: AccessToken::new(token.access_token), identity: identity_from(token.user) })
}

fn parse_rows(json: &str) -> Result<Vec<Row>, BackendError> {
    serde_json::from_str(json).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Backend-provided error text, falling back to the status reason.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_body = parsed.as_ref().and_then(|v| {
        ["message", "msg", "error_description", "error"]
            .iter()
            .find_map(|key| v.get(key).and_then(Value::as_str))
            .map(str::to_owned)
    });
    from_body.unwrap_or_else(|| status.canonical_reason().unwrap_or("backend error").to_owned())
}

/// Total from a `Content-Range` header such as `0-24/3573` or `*/12`.
pub(crate) fn content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/').and_then(|(_, total)| total.trim().parse().ok())
}

// =============================================================================
// BACKEND
// =============================================================================

#[async_trait::async_trait]
impl Backend for RestBackend {
    async fn current_identity(&self, token: &AccessToken) -> Result<Option<Identity>, BackendError> {
        let builder = self.request(Method::GET, &self.auth_url("user"), token.as_str());
        match self.send(builder).await {
            Ok(response) => parse_user(&Self::body_text(response).await?).map(Some),
            Err(BackendError::Unauthorized | BackendError::Rejected { status: 403, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let builder = self
            .request(Method::POST, &self.auth_url("token"), &self.anon_key)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });
        let response = self.send(builder).await?;
        parse_token(&Self::body_text(response).await?)
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        let builder = self.request(Method::POST, &self.auth_url("logout"), token.as_str());
        self.send(builder).await.map(|_| ())
    }

    async fn insert(&self, token: &AccessToken, table: Table, rows: Vec<Row>) -> Result<Vec<Row>, BackendError> {
        let builder = self
            .request(Method::POST, &self.table_url(table), token.as_str())
            .header("Prefer", "return=representation")
            .json(&rows);
        let response = self.send(builder).await?;
        parse_rows(&Self::body_text(response).await?)
    }

    async fn select(&self, token: &AccessToken, query: &Query) -> Result<Vec<Row>, BackendError> {
        let builder = self.request(Method::GET, &self.table_url(query.table), token.as_str()).query(&query.to_params());
        let response = self.send(builder).await?;
        parse_rows(&Self::body_text(response).await?)
    }

    async fn count(&self, token: &AccessToken, query: &Query) -> Result<u64, BackendError> {
        let builder = self
            .request(Method::HEAD, &self.table_url(query.table), token.as_str())
            .header("Prefer", "count=exact")
            .query(&query.to_params());
        let response = self.send(builder).await?;
        response
            .headers()
            .get(reqwest::header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total)
            .ok_or_else(|| BackendError::Parse("missing Content-Range total".into()))
    }

    async fn update(&self, token: &AccessToken, table: Table, id: &str, patch: Row) -> Result<(), BackendError> {
        let builder = self
            .request(Method::PATCH, &self.table_url(table), token.as_str())
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&patch);
        self.send(builder).await.map(|_| ())
    }

    async fn delete(&self, token: &AccessToken, table: Table, id: &str) -> Result<(), BackendError> {
        let builder = self
            .request(Method::DELETE, &self.table_url(table), token.as_str())
            .query(&[("id", format!("eq.{id}"))]);
        self.send(builder).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;
