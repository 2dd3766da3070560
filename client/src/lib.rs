//! # client
//!
//! Leptos + WASM frontend for ProjectHub.
//!
//! This crate contains the app shell and routes, pages, components, reactive
//! state wrappers, and the browser bindings (`localStorage`, `fetch`) that
//! plug into the `session` core. Server rendering (`ssr`) never sees browser
//! storage, so the session stays `Initializing` there and guarded routes
//! render nothing until the browser hydrates.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the server-rendered
/// body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
