//! Hanzi Stroke core crate.
//!
//! Stroke-order demo page: type (or click) a character, watch HanziWriter
//! animate it, toggle a drawing quiz. The [`controller`] is a plain state
//! machine over the [`writer`] and [`controller::View`] traits so it runs and is
//! tested natively; [`web`] supplies the browser implementations and the
//! exported `start_app()` entrypoint.

use wasm_bindgen::prelude::*;

pub mod batch;
pub mod config;
pub mod controller;
pub mod error;
pub mod lexicon;
pub mod web;
pub mod writer;

pub use config::{AppConfig, DisplayOptions, WriterOptions};
pub use controller::{Controller, Selection, Toast, ToastKind, View};
pub use error::{AppError, AppResult};
pub use lexicon::{CharInfo, SAMPLE_HANZI, UNKNOWN, lookup};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Trace).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

/// Start the page with the default element ids and writer options.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    launch(AppConfig::default())
}

/// Start the page with a partial config object, e.g.
/// `{ ids: { target: "writer" }, writer: { strokeColor: "#c00" }, logLevel: "debug" }`.
#[wasm_bindgen]
pub fn start_app_with_config(config: JsValue) -> Result<(), JsValue> {
    let config = if config.is_undefined() || config.is_null() {
        AppConfig::default()
    } else {
        let json: String = js_sys::JSON::stringify(&config)?.into();
        AppConfig::from_json(&json)?
    };
    launch(config)
}

fn launch(config: AppConfig) -> Result<(), JsValue> {
    log::set_max_level(config.log_level().to_level_filter());
    web::launch(config)?;
    Ok(())
}
