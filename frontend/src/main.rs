mod api;
mod app;
mod components;
mod config;
pub mod hooks;
mod logging;
mod pages;
mod storage;
mod surface;
mod utils;

fn main() {
    logging::init();
    tracing::info!(base = config::BASE_URL, "reader starting");
    yew::Renderer::<app::App>::new().render();
}
