//! # client
//!
//! Leptos + WASM frontend for the trip planner.
//!
//! This crate contains pages, components, per-view state containers, and the
//! REST helpers that talk to the server's JSON API. It is compiled twice: with
//! `ssr` into the server binary for rendering, and with `hydrate` to WASM.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
