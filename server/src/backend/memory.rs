//! In-process backend for local runs and tests.
//!
//! DESIGN
//! ======
//! Tables are vectors of JSON rows behind one `tokio::sync::RwLock`. Inserts
//! fill `id` (UUID v4) and `created_at` when absent; timestamps come from a
//! clock that never repeats, so newest-first ordering is total even for rows
//! written in the same microsecond.
//!
//! Test builds can open a recording backend that appends every data call to a
//! log, and individual tables can be switched into a failing state. Tests use
//! both to assert exactly which writes a service issued and how it reacts when
//! one of them is rejected. The default backend keeps no log, so a long-lived
//! dev server does not grow with traffic.
//!
//! TRADE-OFFS
//! ==========
//! Row-level policies are not emulated: any valid token can read any row.
//! Services check trip membership themselves, so behavior matches the hosted
//! backend for every path the application exercises.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde_json::Value;
use time::OffsetDateTime;
use time::macros::format_description;
use tokio::sync::RwLock;

use super::query::value_text;
use super::{AccessToken, AuthSession, Backend, BackendError, Filter, Identity, Order, Query, Row, Table};
use crate::services::session::generate_token;

/// Message the hosted auth service returns for a bad email/password pair.
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(not(test), allow(dead_code))]
pub enum Op {
    Insert,
    Select,
    Count,
    Update,
    Delete,
}

/// One recorded data call.
#[derive(Clone, Debug)]
#[cfg_attr(not(test), allow(dead_code))]
pub struct Call {
    pub op: Op,
    pub table: Table,
    /// Inserted rows, or the single patch of an update.
    pub rows: Vec<Row>,
    /// Target row of an update or delete.
    pub id: Option<String>,
    pub filters: Vec<Filter>,
}

impl Call {
    fn new(op: Op, table: Table) -> Self {
        Self { op, table, rows: Vec::new(), id: None, filters: Vec::new() }
    }
}

struct MemoryUser {
    identity: Identity,
    password: String,
}

#[derive(Default)]
struct Inner {
    users: Vec<MemoryUser>,
    sessions: HashMap<String, String>,
    tables: HashMap<Table, Vec<Row>>,
    failing: HashSet<Table>,
    recording: bool,
    calls: Vec<Call>,
    clock: Option<OffsetDateTime>,
}

#[derive(Default)]
pub struct MemoryBackend {
    inner: RwLock<Inner>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that logs every data call for later inspection.
    #[cfg(test)]
    #[must_use]
    pub fn recording() -> Self {
        let mut backend = Self::default();
        backend.inner.get_mut().recording = true;
        backend
    }

    /// Register a user with a matching profile row.
    #[must_use]
    pub fn with_user(mut self, email: &str, password: &str, full_name: Option<&str>) -> Self {
        self.inner.get_mut().add_user(email, password, full_name);
        self
    }

    pub async fn add_user(&self, email: &str, password: &str, full_name: Option<&str>) -> Identity {
        self.inner.write().await.add_user(email, password, full_name)
    }

    /// Open a session for `user_id` without going through credentials.
    pub async fn issue_token(&self, user_id: &str) -> AccessToken {
        let token = generate_token();
        self.inner.write().await.sessions.insert(token.clone(), user_id.to_owned());
        AccessToken::new(token)
    }

    /// Insert rows directly, bypassing the call log. Returns the stored rows.
    #[cfg(test)]
    pub async fn seed(&self, table: Table, rows: Vec<Row>) -> Vec<Row> {
        self.inner.write().await.store(table, rows)
    }

    /// Make every later call touching `table` fail.
    #[cfg(test)]
    pub async fn fail_table(&self, table: Table) {
        self.inner.write().await.failing.insert(table);
    }

    #[cfg(test)]
    pub async fn rows(&self, table: Table) -> Vec<Row> {
        self.inner.read().await.tables.get(&table).cloned().unwrap_or_default()
    }

    #[cfg(test)]
    pub async fn calls(&self) -> Vec<Call> {
        self.inner.read().await.calls.clone()
    }

    /// Recorded calls of one kind against one table.
    #[cfg(test)]
    pub async fn calls_to(&self, op: Op, table: Table) -> Vec<Call> {
        self.inner.read().await.calls.iter().filter(|c| c.op == op && c.table == table).cloned().collect()
    }

    #[cfg(test)]
    pub async fn clear_calls(&self) {
        self.inner.write().await.calls.clear();
    }
}

impl Inner {
    fn add_user(&mut self, email: &str, password: &str, full_name: Option<&str>) -> Identity {
        let identity = Identity {
            id: uuid::Uuid::new_v4().to_string(),
            email: Some(email.trim().to_lowercase()),
            full_name: full_name.map(str::to_owned),
        };
        let mut profile = Row::new();
        profile.insert("id".into(), Value::from(identity.id.clone()));
        profile.insert("email".into(), identity.email.clone().map_or(Value::Null, Value::from));
        profile.insert("full_name".into(), identity.full_name.clone().map_or(Value::Null, Value::from));
        self.store(Table::Profiles, vec![profile]);
        self.users.push(MemoryUser { identity: identity.clone(), password: password.to_owned() });
        identity
    }

    fn identity_for(&self, token: &AccessToken) -> Option<Identity> {
        let user_id = self.sessions.get(token.as_str())?;
        self.users.iter().find(|u| u.identity.id == *user_id).map(|u| u.identity.clone())
    }

    fn authorize(&self, token: &AccessToken) -> Result<(), BackendError> {
        if self.sessions.contains_key(token.as_str()) { Ok(()) } else { Err(BackendError::Unauthorized) }
    }

    /// Log `call` when recording, then fail if its table is switched off.
    fn record(&mut self, call: Call) -> Result<(), BackendError> {
        let table = call.table;
        if self.recording {
            self.calls.push(call);
        }
        if self.failing.contains(&table) {
            return Err(BackendError::Rejected {
                status: 404,
                message: format!("relation \"public.{table}\" does not exist"),
            });
        }
        Ok(())
    }

    fn next_timestamp(&mut self) -> String {
        let now = OffsetDateTime::now_utc();
        let next = match self.clock {
            Some(last) if now <= last => last + time::Duration::microseconds(1),
            _ => now,
        };
        self.clock = Some(next);
        let fmt = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");
        next.format(fmt).unwrap_or_default()
    }

    fn store(&mut self, table: Table, rows: Vec<Row>) -> Vec<Row> {
        let mut stored = Vec::with_capacity(rows.len());
        for mut row in rows {
            if !row.contains_key("id") {
                row.insert("id".into(), Value::from(uuid::Uuid::new_v4().to_string()));
            }
            if !row.contains_key("created_at") {
                let ts = self.next_timestamp();
                row.insert("created_at".into(), Value::from(ts));
            }
            stored.push(row.clone());
            self.tables.entry(table).or_default().push(row);
        }
        stored
    }

    fn matching(&self, table: Table, filters: &[Filter]) -> Vec<&Row> {
        self.tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| filters.iter().all(|f| f.matches(r))).collect())
            .unwrap_or_default()
    }

    fn lookup(&self, table: Table, id: &str) -> Option<&Row> {
        self.tables.get(&table)?.iter().find(|r| r.get("id").and_then(value_text).as_deref() == Some(id))
    }

    fn evaluate(&self, query: &Query) -> Vec<Row> {
        let mut rows = self.matching(query.table, &query.filters);
        if let Some((column, order)) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare_columns(a.get(column), b.get(column));
                if *order == Order::Desc { ord.reverse() } else { ord }
            });
        }
        rows.into_iter().map(|row| self.shape(query, row)).collect()
    }

    /// Project requested columns and attach the embedded relation.
    fn shape(&self, query: &Query, row: &Row) -> Row {
        let mut out = project(row, &query.columns);
        if let Some(embed) = &query.embed {
            let related = row
                .get(&embed.via)
                .and_then(value_text)
                .and_then(|id| self.lookup(embed.table, &id))
                .map_or(Value::Null, |r| Value::Object(project(r, &embed.columns)));
            out.insert(embed.table.as_str().to_owned(), related);
        }
        out
    }
}

fn project(row: &Row, columns: &[String]) -> Row {
    if columns.is_empty() {
        return row.clone();
    }
    columns.iter().filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone()))).collect()
}

/// Ascending order with nulls last.
fn compare_columns(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
    }
}

#[async_trait::async_trait]
impl Backend for MemoryBackend {
    async fn current_identity(&self, token: &AccessToken) -> Result<Option<Identity>, BackendError> {
        Ok(self.inner.read().await.identity_for(token))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let email = email.trim().to_lowercase();
        let identity = {
            let inner = self.inner.read().await;
            inner
                .users
                .iter()
                .find(|u| u.identity.email.as_deref() == Some(email.as_str()) && u.password == password)
                .map(|u| u.identity.clone())
        };
        let identity =
            identity.ok_or_else(|| BackendError::Rejected { status: 400, message: INVALID_CREDENTIALS.to_owned() })?;
        let access_token = self.issue_token(&identity.id).await;
        Ok(AuthSession { access_token, identity })
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), BackendError> {
        self.inner.write().await.sessions.remove(token.as_str());
        Ok(())
    }

    async fn insert(&self, token: &AccessToken, table: Table, rows: Vec<Row>) -> Result<Vec<Row>, BackendError> {
        let mut inner = self.inner.write().await;
        inner.authorize(token)?;
        inner.record(Call { rows: rows.clone(), ..Call::new(Op::Insert, table) })?;
        Ok(inner.store(table, rows))
    }

    async fn select(&self, token: &AccessToken, query: &Query) -> Result<Vec<Row>, BackendError> {
        let mut inner = self.inner.write().await;
        inner.authorize(token)?;
        inner.record(Call { filters: query.filters.clone(), ..Call::new(Op::Select, query.table) })?;
        Ok(inner.evaluate(query))
    }

    async fn count(&self, token: &AccessToken, query: &Query) -> Result<u64, BackendError> {
        let mut inner = self.inner.write().await;
        inner.authorize(token)?;
        inner.record(Call { filters: query.filters.clone(), ..Call::new(Op::Count, query.table) })?;
        Ok(inner.matching(query.table, &query.filters).len() as u64)
    }

    async fn update(&self, token: &AccessToken, table: Table, id: &str, patch: Row) -> Result<(), BackendError> {
        let mut inner = self.inner.write().await;
        inner.authorize(token)?;
        inner.record(Call { rows: vec![patch.clone()], id: Some(id.to_owned()), ..Call::new(Op::Update, table) })?;
        if let Some(rows) = inner.tables.get_mut(&table) {
            let target = rows.iter_mut().find(|r| r.get("id").and_then(value_text).as_deref() == Some(id));
            if let Some(row) = target {
                row.extend(patch);
            }
        }
        Ok(())
    }

    async fn delete(&self, token: &AccessToken, table: Table, id: &str) -> Result<(), BackendError> {
        let mut inner = self.inner.write().await;
        inner.authorize(token)?;
        inner.record(Call { id: Some(id.to_owned()), ..Call::new(Op::Delete, table) })?;
        if let Some(rows) = inner.tables.get_mut(&table) {
            rows.retain(|r| r.get("id").and_then(value_text).as_deref() != Some(id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
