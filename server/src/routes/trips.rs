//! Trip routes: dashboard list, creation, detail, and category board.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use model::{CategoryBoard, CreateTripRequest, CreateTripResponse, Trip, TripDetail};

use super::ApiError;
use super::auth::AuthUser;
use crate::services::{task, trip};
use crate::state::AppState;

/// `GET /api/trips`: trips the caller belongs to, by start date.
pub async fn list_trips(State(state): State<AppState>, auth: AuthUser) -> Result<Json<Vec<Trip>>, ApiError> {
    let trips = trip::list_trips(state.backend.as_ref(), &auth.token, &auth.identity).await?;
    Ok(Json(trips))
}

/// `POST /api/trips`: run the creation sequence for a wizard submission.
pub async fn create_trip(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<CreateTripResponse>), ApiError> {
    let trip_id = trip::create_trip(state.backend.as_ref(), &auth.token, &auth.identity, &req).await?;
    Ok((StatusCode::CREATED, Json(CreateTripResponse { trip_id })))
}

/// `GET /api/trips/{id}`: detail aggregate for members.
pub async fn trip_detail(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TripDetail>, ApiError> {
    let detail = trip::trip_detail(state.backend.as_ref(), &auth.token, &auth.identity, &id).await?;
    Ok(Json(detail))
}

/// `GET /api/trips/{id}/categories/{category_id}`: task board aggregate.
pub async fn category_board(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, category_id)): Path<(String, String)>,
) -> Result<Json<CategoryBoard>, ApiError> {
    let board = task::category_board(state.backend.as_ref(), &auth.token, &id, &category_id).await?;
    Ok(Json(board))
}

#[cfg(test)]
#[path = "trips_test.rs"]
mod tests;
