//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and the sequencing of backend calls so
//! route handlers can stay focused on protocol translation and auth plumbing.
//! Every service takes the backend as `&dyn Backend` plus the caller's token.

pub mod session;
pub mod task;
pub mod trip;
