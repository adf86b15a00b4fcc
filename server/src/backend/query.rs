//! Select query description shared by both backend implementations.
//!
//! A [`Query`] renders to PostgREST query-string pairs for the REST backend
//! and evaluates directly against rows for the in-memory backend. Only the
//! operators the application needs exist: equality, membership, one sort key,
//! and a single many-to-one embed.

use serde_json::Value;

use super::{Row, Table};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    Eq { column: String, value: String },
    In { column: String, values: Vec<String> },
}

impl Filter {
    /// PostgREST `column=op.value` pair.
    #[must_use]
    pub fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq { column, value } => (column.clone(), format!("eq.{value}")),
            Self::In { column, values } => (column.clone(), format!("in.({})", values.join(","))),
        }
    }

    /// Whether `row` passes this filter. Null and missing columns never match.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Eq { column, value } => row.get(column).and_then(value_text).is_some_and(|v| v == *value),
            Self::In { column, values } => {
                row.get(column).and_then(value_text).is_some_and(|v| values.iter().any(|x| *x == v))
            }
        }
    }
}

/// Many-to-one join: `row[via]` references `table.id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Embed {
    pub table: Table,
    pub via: String,
    pub columns: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub table: Table,
    /// Empty means every column.
    pub columns: Vec<String>,
    pub embed: Option<Embed>,
    pub filters: Vec<Filter>,
    pub order: Option<(String, Order)>,
}

impl Query {
    #[must_use]
    pub fn select(table: Table) -> Self {
        Self { table, columns: Vec::new(), embed: None, filters: Vec::new(), order: None }
    }

    #[must_use]
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    #[must_use]
    pub fn embed(mut self, table: Table, via: &str, columns: &[&str]) -> Self {
        self.embed = Some(Embed {
            table,
            via: via.to_owned(),
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
        });
        self
    }

    #[must_use]
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq { column: column.to_owned(), value: value.into() });
        self
    }

    #[must_use]
    pub fn is_in<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In { column: column.to_owned(), values: values.into_iter().map(Into::into).collect() });
        self
    }

    #[must_use]
    pub fn order(mut self, column: &str, order: Order) -> Self {
        self.order = Some((column.to_owned(), order));
        self
    }

    /// The `select=` expression, e.g. `user_id,profiles(full_name,email)`.
    #[must_use]
    pub fn select_clause(&self) -> String {
        let mut parts: Vec<String> = if self.columns.is_empty() { vec!["*".to_owned()] } else { self.columns.clone() };
        if let Some(embed) = &self.embed {
            parts.push(format!("{}({})", embed.table.as_str(), embed.columns.join(",")));
        }
        parts.join(",")
    }

    /// Query-string pairs in PostgREST syntax.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_owned(), self.select_clause())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if let Some((column, order)) = &self.order {
            params.push(("order".to_owned(), format!("{column}.{}", order.as_str())));
        }
        params
    }
}

/// Text form of a scalar column value, as it would appear in a filter.
#[must_use]
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
