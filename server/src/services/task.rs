//! Task service: category board aggregate and per-task writes.
//!
//! DESIGN
//! ======
//! Every write touches exactly one task. Creation inserts a full row with the
//! unset optionals as `null`; updates carry a single column so concurrent
//! edits of different fields never clobber each other (last write wins per
//! column). The board aggregate is read-only and tolerant: only the category
//! and trip lookups can fail it.

use model::validate::validate_task_title;
use model::{
    BoardTrip, Category, CategoryBoard, MemberView, NewTask, Profile, Task, TaskPatch, TaskStatus, ValidationError,
};
use serde::Serialize;
use serde_json::Value;

use crate::backend::{AccessToken, Backend, BackendError, Order, Query, Row, Table, decode_row, decode_rows, encode_row};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Category not found")]
    CategoryNotFound,
    #[error("Trip not found")]
    TripNotFound,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Serialize)]
struct NewTaskRow<'a> {
    category_id: &'a str,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    assignee_id: Option<String>,
    due_date: Option<String>,
}

// =============================================================================
// BOARD
// =============================================================================

/// Category, trip header, tasks newest first, and the trip's member roster.
///
/// # Errors
///
/// [`TaskError::CategoryNotFound`] / [`TaskError::TripNotFound`] when either
/// lookup finds nothing.
pub async fn category_board(
    backend: &dyn Backend,
    token: &AccessToken,
    trip_id: &str,
    category_id: &str,
) -> Result<CategoryBoard, TaskError> {
    let category: Category = first(backend, token, Query::select(Table::Categories).eq("id", category_id))
        .await?
        .ok_or(TaskError::CategoryNotFound)?;
    let trip: BoardTrip = first(backend, token, Query::select(Table::Trips).columns(&["id", "name"]).eq("id", trip_id))
        .await?
        .ok_or(TaskError::TripNotFound)?;

    let tasks = load_tasks(backend, token, category_id).await;
    let members = load_members(backend, token, trip_id).await;

    Ok(CategoryBoard { trip, category, tasks, members })
}

async fn first<T: serde::de::DeserializeOwned>(
    backend: &dyn Backend,
    token: &AccessToken,
    query: Query,
) -> Result<Option<T>, TaskError> {
    match backend.select(token, &query).await {
        Ok(rows) => Ok(rows.into_iter().next().map(decode_row).transpose()?),
        Err(BackendError::Unauthorized) => Err(BackendError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!(error = %e, table = %query.table, "board lookup failed");
            Ok(None)
        }
    }
}

/// Tasks of a category, newest first. Empty on failure.
pub async fn load_tasks(backend: &dyn Backend, token: &AccessToken, category_id: &str) -> Vec<Task> {
    let query = Query::select(Table::Tasks).eq("category_id", category_id).order("created_at", Order::Desc);
    match backend.select(token, &query).await.and_then(decode_rows) {
        Ok(tasks) => tasks,
        Err(e) => {
            tracing::warn!(error = %e, %category_id, "task load failed");
            Vec::new()
        }
    }
}

/// Member roster joined with profiles. Empty on failure.
async fn load_members(backend: &dyn Backend, token: &AccessToken, trip_id: &str) -> Vec<MemberView> {
    let query = Query::select(Table::TripMembers)
        .columns(&["user_id"])
        .embed(Table::Profiles, "user_id", &["full_name", "email"])
        .eq("trip_id", trip_id);
    match backend.select(token, &query).await {
        Ok(rows) => rows.iter().filter_map(member_view).collect(),
        Err(e) => {
            tracing::warn!(error = %e, %trip_id, "member roster load failed");
            Vec::new()
        }
    }
}

/// Flatten a membership row with its embedded profile. The embed arrives as
/// an object, an array of one, or null depending on the relationship shape.
pub(crate) fn member_view(row: &Row) -> Option<MemberView> {
    let user_id = row.get("user_id")?.as_str()?.to_owned();
    let profile = match row.get("profiles") {
        Some(Value::Array(items)) => items.first(),
        Some(v @ Value::Object(_)) => Some(v),
        _ => None,
    };
    let profile: Profile = profile.and_then(|p| serde_json::from_value(p.clone()).ok()).unwrap_or_default();
    Some(MemberView { user_id, full_name: profile.full_name, email: profile.email })
}

// =============================================================================
// WRITES
// =============================================================================

/// Insert a task under `category_id`; returns the stored task.
///
/// # Errors
///
/// [`TaskError::Invalid`] for a blank title, before any backend call.
pub async fn create_task(
    backend: &dyn Backend,
    token: &AccessToken,
    category_id: &str,
    new_task: &NewTask,
) -> Result<Task, TaskError> {
    let title = validate_task_title(&new_task.title)?;
    let normalize = |v: &Option<String>| v.as_deref().and_then(model::validate::blank_to_none);
    let row = encode_row(&NewTaskRow {
        category_id,
        title,
        description: normalize(&new_task.description),
        status: new_task.status,
        assignee_id: None,
        due_date: normalize(&new_task.due_date),
    })?;
    let created = backend.insert(token, Table::Tasks, vec![row]).await?;
    let task: Task = created
        .into_iter()
        .next()
        .map(decode_row)
        .transpose()?
        .ok_or_else(|| BackendError::Parse("insert returned no row".into()))?;
    tracing::info!(task_id = %task.id, %category_id, "task created");
    Ok(task)
}

/// Write one column of a task.
///
/// # Errors
///
/// [`TaskError::Invalid`] for a blank title; backend failures otherwise.
pub async fn update_task(
    backend: &dyn Backend,
    token: &AccessToken,
    task_id: &str,
    patch: TaskPatch,
) -> Result<TaskPatch, TaskError> {
    let patch = patch.normalized();
    if let TaskPatch::Title(title) = &patch {
        validate_task_title(title)?;
    }
    backend.update(token, Table::Tasks, task_id, patch.to_update()).await?;
    tracing::debug!(%task_id, column = patch.column(), "task updated");
    Ok(patch)
}

/// Delete a task.
///
/// # Errors
///
/// Backend failures.
pub async fn delete_task(backend: &dyn Backend, token: &AccessToken, task_id: &str) -> Result<(), TaskError> {
    backend.delete(token, Table::Tasks, task_id).await?;
    tracing::info!(%task_id, "task deleted");
    Ok(())
}

#[cfg(test)]
#[path = "task_test.rs"]
mod tests;
