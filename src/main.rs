//! Task Matrix Frontend Entry Point

mod api;
mod app;
mod board;
mod card;
mod components;
mod context;
mod dispatcher;
mod filter;
mod form;
mod loader;
mod matrix;
mod models;
mod persistence;
mod shortcuts;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
