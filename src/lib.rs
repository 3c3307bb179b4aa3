pub mod app;
pub mod components;
pub mod connectivity;
pub mod models;
pub mod services;
pub mod state;

use wasm_bindgen::prelude::*;

use app::App;

#[wasm_bindgen(start)]
pub fn run_app() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting chat client");
    yew::Renderer::<App>::new().render();
}
