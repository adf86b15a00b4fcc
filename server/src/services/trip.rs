//! Trip service: dashboard listing, creation sequence, and detail aggregate.
//!
//! DESIGN
//! ======
//! Creation is a fixed sequence of dependent inserts: trip, owner membership,
//! categories, then invitations. Steps after the first use the id returned by
//! the trip insert. There is no transaction and no compensation; a failure
//! part way leaves the rows already written.
//!
//! ERROR HANDLING
//! ==============
//! The first three creation steps are primary: their failure aborts and
//! surfaces the backend's message prefixed with the step. Invitations are
//! secondary and only logged. The detail aggregate degrades the same way:
//! the trip and membership lookups gate the view, while member count,
//! categories, and task tallies fall back to defaults when their reads fail.

use std::collections::HashMap;

use model::validate::{blank_to_none, validate_basics, validate_categories, validate_invitees};
use model::{
    Category, CategoryTile, CreateTripRequest, Invitation, InvitationStatus, MemberRole, Trip, TripDetail, TripMember,
    ValidationError,
};
use serde::Serialize;

use crate::backend::{
    AccessToken, Backend, BackendError, Identity, Order, Query, Row, Table, decode_row, decode_rows, encode_row,
};

// =============================================================================
// TYPES
// =============================================================================

/// Which creation step failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreateStep {
    Trip,
    Member,
    Categories,
}

impl CreateStep {
    fn action(self) -> &'static str {
        match self {
            Self::Trip => "create trip",
            Self::Member => "add trip member",
            Self::Categories => "create categories",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TripError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Trip not found")]
    NotFound,
    #[error("You are not a member of this trip")]
    Forbidden,
    #[error("Failed to {}: {message}", .step.action())]
    Step { step: CreateStep, message: String },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Serialize)]
struct NewTripRow<'a> {
    name: &'a str,
    destination: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    description: Option<String>,
    created_by: &'a str,
}

#[derive(Serialize)]
struct NewCategoryRow<'a> {
    trip_id: &'a str,
    name: &'a str,
    icon: &'a str,
}

fn step_error(step: CreateStep) -> impl FnOnce(BackendError) -> TripError {
    move |e| TripError::Step { step, message: e.to_string() }
}

fn encode_all<T: Serialize>(items: &[T]) -> Result<Vec<Row>, BackendError> {
    items.iter().map(encode_row).collect()
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Trips the user belongs to, ascending by start date.
///
/// # Errors
///
/// Propagates backend failures of either read.
pub async fn list_trips(backend: &dyn Backend, token: &AccessToken, user: &Identity) -> Result<Vec<Trip>, TripError> {
    let memberships = backend
        .select(token, &Query::select(Table::TripMembers).columns(&["trip_id"]).eq("user_id", user.id.as_str()))
        .await?;
    let trip_ids: Vec<String> = memberships
        .iter()
        .filter_map(|row| row.get("trip_id").and_then(|v| v.as_str()).map(str::to_owned))
        .collect();
    if trip_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = backend
        .select(token, &Query::select(Table::Trips).is_in("id", trip_ids).order("start_date", Order::Asc))
        .await?;
    Ok(decode_rows(rows)?)
}

// =============================================================================
// CREATION
// =============================================================================

/// Validate the wizard payload and write trip, owner membership, categories,
/// and invitations in that order. Returns the new trip id.
///
/// # Errors
///
/// [`TripError::Invalid`] before any backend call; [`TripError::Step`] when
/// one of the first three inserts fails.
pub async fn create_trip(
    backend: &dyn Backend,
    token: &AccessToken,
    user: &Identity,
    req: &CreateTripRequest,
) -> Result<String, TripError> {
    let basics = &req.basics;
    validate_basics(basics)?;
    let invitees = validate_invitees(&req.invitees)?;
    validate_categories(&req.categories)?;

    let trip_row = encode_row(&NewTripRow {
        name: basics.name.trim(),
        destination: basics.destination.trim(),
        start_date: basics.start_date.trim(),
        end_date: basics.end_date.trim(),
        description: blank_to_none(&basics.description),
        created_by: &user.id,
    })?;
    let created = backend.insert(token, Table::Trips, vec![trip_row]).await.map_err(step_error(CreateStep::Trip))?;
    let trip_id = created
        .into_iter()
        .next()
        .and_then(|row| row.get("id").and_then(|v| v.as_str()).map(str::to_owned))
        .ok_or_else(|| TripError::Step { step: CreateStep::Trip, message: "no trip id returned".into() })?;

    let owner = TripMember { trip_id: trip_id.clone(), user_id: user.id.clone(), role: MemberRole::Owner };
    backend
        .insert(token, Table::TripMembers, vec![encode_row(&owner)?])
        .await
        .map_err(step_error(CreateStep::Member))?;

    let categories: Vec<NewCategoryRow<'_>> = req
        .categories
        .iter()
        .map(|c| NewCategoryRow { trip_id: &trip_id, name: c.name.trim(), icon: c.icon.as_str() })
        .collect();
    backend
        .insert(token, Table::Categories, encode_all(&categories)?)
        .await
        .map_err(step_error(CreateStep::Categories))?;

    if !invitees.is_empty() {
        let invitations: Vec<Invitation> = invitees
            .into_iter()
            .map(|email| Invitation {
                trip_id: trip_id.clone(),
                email,
                invited_by: user.id.clone(),
                status: InvitationStatus::Pending,
            })
            .collect();
        if let Err(e) = backend.insert(token, Table::Invitations, encode_all(&invitations)?).await {
            tracing::warn!(error = %e, %trip_id, count = invitations.len(), "invitation insert failed");
        }
    }

    tracing::info!(%trip_id, user_id = %user.id, categories = req.categories.len(), "trip created");
    Ok(trip_id)
}

// =============================================================================
// DETAIL
// =============================================================================

/// Load a trip by id.
///
/// A missing row is [`TripError::NotFound`]. Any other read failure is
/// logged and reported the same way, except an expired session.
///
/// # Errors
///
/// See above.
pub async fn load_trip(backend: &dyn Backend, token: &AccessToken, trip_id: &str) -> Result<Trip, TripError> {
    match backend.select(token, &Query::select(Table::Trips).eq("id", trip_id)).await {
        Ok(rows) => rows.into_iter().next().map(decode_row).transpose()?.ok_or(TripError::NotFound),
        Err(BackendError::Unauthorized) => Err(BackendError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!(error = %e, %trip_id, "trip lookup failed");
            Err(TripError::NotFound)
        }
    }
}

/// Require a membership row for `user` on `trip_id`.
///
/// # Errors
///
/// [`TripError::Forbidden`] when there is none or the lookup fails.
pub async fn ensure_member(
    backend: &dyn Backend,
    token: &AccessToken,
    user: &Identity,
    trip_id: &str,
) -> Result<(), TripError> {
    let query = Query::select(Table::TripMembers).columns(&["trip_id"]).eq("trip_id", trip_id).eq("user_id", user.id.as_str());
    match backend.select(token, &query).await {
        Ok(rows) if !rows.is_empty() => Ok(()),
        Ok(_) => Err(TripError::Forbidden),
        Err(BackendError::Unauthorized) => Err(BackendError::Unauthorized.into()),
        Err(e) => {
            tracing::warn!(error = %e, %trip_id, "membership lookup failed");
            Err(TripError::Forbidden)
        }
    }
}

/// Trip, member count, and categories with task tallies.
///
/// # Errors
///
/// [`TripError::NotFound`] or [`TripError::Forbidden`] from the gating
/// lookups; later reads never fail the aggregate.
pub async fn trip_detail(
    backend: &dyn Backend,
    token: &AccessToken,
    user: &Identity,
    trip_id: &str,
) -> Result<TripDetail, TripError> {
    let trip = load_trip(backend, token, trip_id).await?;
    ensure_member(backend, token, user, trip_id).await?;

    let member_count = match backend.count(token, &Query::select(Table::TripMembers).eq("trip_id", trip_id)).await {
        Ok(0) => 1,
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, %trip_id, "member count failed");
            1
        }
    };

    let categories = load_categories(backend, token, trip_id).await;
    let counts = tally_tasks(backend, token, &categories).await;
    let categories = categories
        .into_iter()
        .map(|category| {
            let task_count = counts.get(&category.id).copied().unwrap_or(0);
            CategoryTile { category, task_count }
        })
        .collect();

    Ok(TripDetail { trip, member_count, categories })
}

async fn load_categories(backend: &dyn Backend, token: &AccessToken, trip_id: &str) -> Vec<Category> {
    let query = Query::select(Table::Categories).eq("trip_id", trip_id).order("created_at", Order::Asc);
    match backend.select(token, &query).await.and_then(decode_rows) {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(error = %e, %trip_id, "category load failed");
            Vec::new()
        }
    }
}

/// Task count per category id. Empty on failure.
async fn tally_tasks(backend: &dyn Backend, token: &AccessToken, categories: &[Category]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    if categories.is_empty() {
        return counts;
    }
    let query = Query::select(Table::Tasks)
        .columns(&["category_id"])
        .is_in("category_id", categories.iter().map(|c| c.id.clone()));
    match backend.select(token, &query).await {
        Ok(rows) => {
            for id in rows.iter().filter_map(|r| r.get("category_id").and_then(|v| v.as_str())) {
                *counts.entry(id.to_owned()).or_insert(0) += 1;
            }
        }
        Err(e) => tracing::warn!(error = %e, "task tally failed"),
    }
    counts
}

#[cfg(test)]
#[path = "trip_test.rs"]
mod tests;
