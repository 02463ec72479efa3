#![allow(warnings)]
//! Garden Map Frontend Entry Point

mod api;
mod app;
mod components;
mod context;
mod editor;
mod error;
mod geometry;
mod intent;
mod map_adapter;
mod models;
mod spatial;
mod store;
mod sync;
#[cfg(test)]
mod test_fixtures;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
