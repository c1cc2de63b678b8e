//! Report UI Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod launches;
mod messenger;
mod models;
mod profile;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }
    mount_to_body(App);
}
