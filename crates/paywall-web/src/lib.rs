//! Paywall Web Frontend
//!
//! Leptos-based WASM front end: an article page gated by the paywall
//! controller.

mod app;
mod browser;
mod components;
mod config;
mod logging;
mod pages;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(App);
}
