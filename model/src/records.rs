//! Row types for the hosted backend's tables.
//!
//! DESIGN
//! ======
//! Field names match the backend's column names so rows deserialize straight
//! from select responses. Optional columns carry `#[serde(default)]` because
//! the backend omits columns that a projection did not ask for.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// TRIPS
// =============================================================================

/// A trip: the top-level planning unit shared between members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub destination: String,
    /// First day of the trip (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of the trip (`YYYY-MM-DD`), strictly after `start_date`.
    pub end_date: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_by: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Role of a user within a trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    #[default]
    Member,
}

impl MemberRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

/// Membership row pairing a trip with a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripMember {
    pub trip_id: String,
    pub user_id: String,
    #[serde(default)]
    pub role: MemberRole,
}

// =============================================================================
// CATEGORIES
// =============================================================================

/// A named, iconed bucket of tasks within one trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// INVITATIONS
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    #[default]
    Pending,
}

/// A best-effort record of an email invited to a trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub trip_id: String,
    pub email: String,
    pub invited_by: String,
    #[serde(default)]
    pub status: InvitationStatus,
}

// =============================================================================
// TASKS
// =============================================================================

/// Progress of a single task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [Self; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    /// Wire / form value (`not_started`, `in_progress`, `completed`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Human label used by status badges and selectors.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parse a wire / form value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    /// Target of the single-click completion checkbox.
    ///
    /// A completed task goes back to `not_started`; anything else completes.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::NotStarted,
            Self::NotStarted | Self::InProgress => Self::Completed,
        }
    }
}

/// A single planning item within a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<String>,
    /// Due day (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

// =============================================================================
// PROFILES / MEMBERS
// =============================================================================

/// Public profile row keyed by user id. Embedded profiles arrive without `id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A trip member joined with its profile for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub user_id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl MemberView {
    /// Display label: full name, else email, else a generic placeholder.
    #[must_use]
    pub fn label(&self) -> String {
        let non_blank = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
        non_blank(&self.full_name)
            .or_else(|| non_blank(&self.email))
            .unwrap_or_else(|| "Member".to_owned())
    }
}

/// Label for a task's assignee, `"Unassigned"` when the id is not on the roster.
#[must_use]
pub fn assignee_label(members: &[MemberView], assignee_id: Option<&str>) -> String {
    assignee_id
        .and_then(|id| members.iter().find(|m| m.user_id == id))
        .map_or_else(|| "Unassigned".to_owned(), MemberView::label)
}
