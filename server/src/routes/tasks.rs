//! Task routes: create, single-field patch, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use model::{NewTask, Task, TaskPatch};

use super::ApiError;
use super::auth::AuthUser;
use crate::services::task;
use crate::state::AppState;

/// `POST /api/categories/{category_id}/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(category_id): Path<String>,
    Json(new_task): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = task::create_task(state.backend.as_ref(), &auth.token, &category_id, &new_task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PATCH /api/tasks/{id}`: echoes the normalized patch that was written.
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<TaskPatch>, ApiError> {
    let applied = task::update_task(state.backend.as_ref(), &auth.token, &id, patch).await?;
    Ok(Json(applied))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    task::delete_task(state.backend.as_ref(), &auth.token, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tests;
