//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by view (`wizard`, `trip`, `task_board`, ...) so each page
//! depends on one small model with pure transitions that tests drive without
//! a browser.

pub mod auth;
pub mod task_board;
pub mod trip;
pub mod trips;
pub mod wizard;
