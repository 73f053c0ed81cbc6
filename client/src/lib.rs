//! # client
//!
//! Leptos + WASM frontend for the OpticalHub eyewear storefront.
//!
//! This crate contains the session bootstrap and redirect resolver, the
//! record-store services behind the catalog, and the pages and components
//! that render them. The server crate renders [`app::App`] with SSR; the
//! browser hydrates it through [`hydrate`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod services;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
