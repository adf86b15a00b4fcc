//! Request and response bodies of the server's JSON API.
//!
//! DESIGN
//! ======
//! Aggregates (`TripDetail`, `CategoryBoard`) are shaped for exactly one view
//! each, so a page mounts with a single request. Task edits travel as a
//! `TaskPatch` carrying one field, which keeps every write scoped to the
//! column the user touched.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::{Category, MemberView, Task, TaskStatus, Trip};
use crate::validate::blank_to_none;

/// Icon given to a custom category whose icon input was left empty.
pub const CUSTOM_CATEGORY_ICON: &str = "📌";

const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Lodging", "🏠"),
    ("Activities", "🎯"),
    ("Food", "🍴"),
    ("Transportation", "🚗"),
    ("Home & Away", "🏡"),
];

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in user as returned by `/api/auth/me` and `/api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub display_name: String,
}

// =============================================================================
// TRIP CREATION
// =============================================================================

/// Wizard step one: the trip's own fields, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripBasics {
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

/// A category to create alongside a new trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
}

impl CategoryDraft {
    /// The five categories every new trip starts from.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, icon)| Self { name: (*name).to_owned(), icon: (*icon).to_owned() })
            .collect()
    }

    /// Build a custom category; an empty icon gets [`CUSTOM_CATEGORY_ICON`].
    #[must_use]
    pub fn custom(name: &str, icon: &str) -> Self {
        let icon = icon.trim();
        Self {
            name: name.trim().to_owned(),
            icon: if icon.is_empty() { CUSTOM_CATEGORY_ICON.to_owned() } else { icon.to_owned() },
        }
    }
}

/// Body of `POST /api/trips`: everything the wizard collected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTripRequest {
    pub basics: TripBasics,
    #[serde(default)]
    pub invitees: Vec<String>,
    /// Enabled categories only.
    pub categories: Vec<CategoryDraft>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTripResponse {
    pub trip_id: String,
}

// =============================================================================
// TRIP DETAIL
// =============================================================================

/// A category with the number of tasks filed under it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTile {
    pub category: Category,
    pub task_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetail {
    pub trip: Trip,
    pub member_count: u64,
    pub categories: Vec<CategoryTile>,
}

// =============================================================================
// TASK BOARD
// =============================================================================

/// The slice of a trip the task board header needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTrip {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBoard {
    pub trip: BoardTrip,
    pub category: Category,
    /// Newest first.
    pub tasks: Vec<Task>,
    pub members: Vec<MemberView>,
}

/// Body of `POST /api/categories/{id}/tasks`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl NewTask {
    /// Build from raw form inputs, mapping blank optionals to `None`.
    #[must_use]
    pub fn from_form(title: &str, description: &str, due_date: &str, status: TaskStatus) -> Self {
        Self {
            title: title.trim().to_owned(),
            description: blank_to_none(description),
            due_date: blank_to_none(due_date),
            status,
        }
    }
}

/// Task fields editable inline on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    Title,
    Description,
    Status,
    DueDate,
}

/// A write of exactly one task column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum TaskPatch {
    Title(String),
    Description(Option<String>),
    Status(TaskStatus),
    DueDate(Option<String>),
    Assignee(Option<String>),
}

impl TaskPatch {
    /// Backend column written by this patch.
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Description(_) => "description",
            Self::Status(_) => "status",
            Self::DueDate(_) => "due_date",
            Self::Assignee(_) => "assignee_id",
        }
    }

    /// Trim text and map blank optionals to `None`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let blank = |v: Option<String>| v.as_deref().and_then(blank_to_none);
        match self {
            Self::Title(t) => Self::Title(t.trim().to_owned()),
            Self::Description(d) => Self::Description(blank(d)),
            Self::DueDate(d) => Self::DueDate(blank(d)),
            Self::Assignee(a) => Self::Assignee(blank(a)),
            Self::Status(s) => Self::Status(s),
        }
    }

    /// The single-column update object sent to the backend.
    #[must_use]
    pub fn to_update(&self) -> Map<String, Value> {
        let value = match self {
            Self::Title(t) => Value::from(t.clone()),
            Self::Status(s) => Value::from(s.as_str()),
            Self::Description(v) | Self::DueDate(v) | Self::Assignee(v) => v.clone().map_or(Value::Null, Value::from),
        };
        let mut map = Map::new();
        map.insert(self.column().to_owned(), value);
        map
    }

    /// Merge this patch into a local task copy.
    pub fn apply(&self, task: &mut Task) {
        match self {
            Self::Title(t) => task.title.clone_from(t),
            Self::Description(d) => task.description.clone_from(d),
            Self::Status(s) => task.status = *s,
            Self::DueDate(d) => task.due_date.clone_from(d),
            Self::Assignee(a) => task.assignee_id.clone_from(a),
        }
    }
}
