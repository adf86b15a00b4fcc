//! Shared trip-planner records, payloads, and validation rules.
//!
//! This crate owns the wire representation used by both `server` and `client`.
//! Records mirror the hosted backend's tables; payloads are the JSON bodies of
//! the server's REST API. Validation lives here so the wizard can block a
//! transition in the browser and the server can refuse the same input before
//! any backend call is issued.

pub mod format;
pub mod payload;
pub mod records;
pub mod validate;

pub use payload::{
    BoardTrip, CategoryBoard, CategoryDraft, CategoryTile, CreateTripRequest, CreateTripResponse, CurrentUser,
    LoginRequest, NewTask, TaskField, TaskPatch, TripBasics, TripDetail,
};
pub use records::{
    Category, Invitation, InvitationStatus, MemberRole, MemberView, Profile, Task, TaskStatus, Trip, TripMember,
    assignee_label,
};
pub use validate::ValidationError;
