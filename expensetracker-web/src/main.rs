mod api;
mod app;
mod components;
mod config;
mod containers;
mod models;
mod pages;
mod routes;
mod scope;
mod session;
mod telemetry;

#[cfg(test)]
mod api_test;

use app::App;
use tracing::info;
use yew::Renderer;

fn main() {
    telemetry::install_panic_hook();
    telemetry::init();

    info!("starting expense tracker");
    Renderer::<App>::new().render();
}
