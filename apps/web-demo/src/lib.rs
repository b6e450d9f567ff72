//! Browser entry point for the lorelist demo.
//!
//! Build with `wasm-pack build apps/web-demo --target web` and serve
//! `index.html` next to the generated `pkg/` directory.

use lorelist_app::AppLauncher;
use wasm_bindgen::prelude::*;

fn create_app() -> AppLauncher {
    AppLauncher::new().with_root_id("app")
}

#[wasm_bindgen(start)]
pub fn wasm_start() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("starting lorelist");
    create_app().run_web()
}
