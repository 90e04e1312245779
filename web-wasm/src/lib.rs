//! Photo Timeline Web front end (Leptos + WASM)

mod api;
mod app;
mod components;
mod config;
mod dispatch;
mod dom;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    app::start();
}
