//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (loading, backend calls,
//! navigation) and delegates rendering details to `components`.

pub mod category;
pub mod create_trip;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod trip;
