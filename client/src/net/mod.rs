//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps the server's JSON REST surface. The wire schema lives in the
//! shared `model` crate.

pub mod api;
