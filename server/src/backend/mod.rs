//! Hosted backend boundary: auth and table access.
//!
//! ARCHITECTURE
//! ============
//! Every read and write the application performs goes through [`Backend`].
//! Authentication, persistence, and row-level authorization live on the other
//! side of this trait; services only compose calls. Two implementations exist:
//! [`rest::RestBackend`] speaks the hosted service's HTTP dialect, and
//! [`memory::MemoryBackend`] keeps tables in process for local runs and tests.
//!
//! Rows cross the boundary as untyped JSON objects; services decode them into
//! `model` records with [`decode_rows`].

pub mod memory;
pub mod query;
pub mod rest;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use query::{Filter, Order, Query};

/// A backend row: column name to JSON value.
pub type Row = Map<String, Value>;

// =============================================================================
// TABLES
// =============================================================================

/// Tables the application reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Trips,
    TripMembers,
    Categories,
    Tasks,
    Invitations,
    Profiles,
}

impl Table {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trips => "trips",
            Self::TripMembers => "trip_members",
            Self::Categories => "categories",
            Self::Tasks => "tasks",
            Self::Invitations => "invitations",
            Self::Profiles => "profiles",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Bearer token issued by the backend's auth service.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// The authenticated user behind an access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
    /// Profile / metadata full name, when the user set one.
    pub full_name: Option<String>,
}

impl Identity {
    /// Full name if present, else the local part of the email, else empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.full_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .unwrap_or_default()
            .to_owned()
    }
}

/// Result of a successful credential sign-in.
#[derive(Clone, Debug)]
pub struct AuthSession {
    pub access_token: AccessToken,
    pub identity: Identity,
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The backend answered with an error status; `message` is its own text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The access token was missing, expired, or unknown.
    #[error("not authenticated")]
    Unauthorized,

    /// The request never produced a response.
    #[error("backend request failed: {0}")]
    Transport(String),

    /// A response or row did not have the expected shape.
    #[error("backend response parse failed: {0}")]
    Parse(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// TRAIT
// =============================================================================

/// Auth and data operations of the hosted backend.
///
/// Data calls carry the caller's token so the backend can apply its own
/// row-level policies.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Identity behind `token`, or `None` when the token is not valid.
    async fn current_identity(&self, token: &AccessToken) -> Result<Option<Identity>, BackendError>;

    /// Exchange email + password for a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError>;

    /// Revoke `token`.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError>;

    /// Insert one or more rows; returns the created rows.
    async fn insert(&self, token: &AccessToken, table: Table, rows: Vec<Row>) -> Result<Vec<Row>, BackendError>;

    /// Filtered, ordered select.
    async fn select(&self, token: &AccessToken, query: &Query) -> Result<Vec<Row>, BackendError>;

    /// Count-only select over the query's filters.
    async fn count(&self, token: &AccessToken, query: &Query) -> Result<u64, BackendError>;

    /// Write `patch` onto the row whose `id` matches.
    async fn update(&self, token: &AccessToken, table: Table, id: &str, patch: Row) -> Result<(), BackendError>;

    /// Delete the row whose `id` matches.
    async fn delete(&self, token: &AccessToken, table: Table, id: &str) -> Result<(), BackendError>;
}

// =============================================================================
// ROW CODEC
// =============================================================================

/// Serialize a record into a row.
///
/// # Errors
///
/// Returns [`BackendError::Parse`] if `value` does not serialize to an object.
pub fn encode_row<T: Serialize>(value: &T) -> Result<Row, BackendError> {
    match serde_json::to_value(value).map_err(|e| BackendError::Parse(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(BackendError::Parse(format!("expected object, got {other}"))),
    }
}

/// Decode one row into a record.
///
/// # Errors
///
/// Returns [`BackendError::Parse`] when the row does not match `T`.
pub fn decode_row<T: DeserializeOwned>(row: Row) -> Result<T, BackendError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Decode rows into records.
///
/// # Errors
///
/// Returns [`BackendError::Parse`] on the first row that does not match `T`.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, BackendError> {
    rows.into_iter().map(decode_row).collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
