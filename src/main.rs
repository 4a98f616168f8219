//! Explorers Admin Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod logger;
mod route;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    logger::init(config::log_level());
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
