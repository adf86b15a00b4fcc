//! Server configuration parsed from environment variables.
//!
//! `BACKEND_URL` decides which backend runs: when set, the hosted REST
//! backend; when absent, the in-memory backend seeded from
//! `MEMORY_SEED_USERS`.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
    #[error("BACKEND_ANON_KEY is required when BACKEND_URL is set")]
    MissingAnonKey,
    #[error("invalid MEMORY_SEED_USERS entry '{0}' (expected email:password[:Full Name])")]
    InvalidSeedUser(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestConfig {
    pub url: String,
    pub anon_key: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// A user the in-memory backend starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Rest(RestConfig),
    Memory { users: Vec<SeedUser> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_URL`: hosted backend base URL; in-memory backend when absent
    /// - `BACKEND_ANON_KEY`: required with `BACKEND_URL`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    /// - `MEMORY_SEED_USERS`: comma-separated `email:password[:Full Name]`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparseable port, a REST backend without
    /// an anon key, or a malformed seed user entry.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let backend = match non_empty_var("BACKEND_URL") {
            Some(url) => BackendConfig::Rest(RestConfig {
                url: url.trim_end_matches('/').to_owned(),
                anon_key: non_empty_var("BACKEND_ANON_KEY").ok_or(ConfigError::MissingAnonKey)?,
                request_timeout_secs: env_parse_u64("BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
                connect_timeout_secs: env_parse_u64("BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
            }),
            None => BackendConfig::Memory {
                users: parse_seed_users(&std::env::var("MEMORY_SEED_USERS").unwrap_or_default())?,
            },
        };

        Ok(Self { port, backend })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

/// Parse `email:password[:Full Name]` entries separated by commas.
pub(crate) fn parse_seed_users(raw: &str) -> Result<Vec<SeedUser>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let email = parts.next().unwrap_or_default().trim();
            let password = parts.next().unwrap_or_default();
            let full_name = parts.next().map(str::trim).filter(|n| !n.is_empty()).map(str::to_owned);
            if email.is_empty() || password.is_empty() {
                return Err(ConfigError::InvalidSeedUser(entry.to_owned()));
            }
            Ok(SeedUser { email: email.to_owned(), password: password.to_owned(), full_name })
        })
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
