//! Browser bridge for the Stardrift backdrop.
//!
//! ```ignore
//! const backdrop = new Backdrop(null, false);
//! backdrop.mount(document.getElementById("sky"));
//! backdrop.activate(true);
//! ```

pub mod canvas;
pub mod runner;

pub use canvas::{CanvasSurface, SurfaceError};
pub use runner::BackdropRunner;

use stardrift::EngineConfig;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// JS handle to one backdrop. Each handle owns its own engine, so several
/// canvases on one page animate independently.
#[wasm_bindgen]
pub struct Backdrop {
    runner: BackdropRunner,
}

#[wasm_bindgen]
impl Backdrop {
    /// `config_json` overrides fields of the default configuration. Invalid
    /// config is logged and replaced by the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, debug: bool) -> Backdrop {
        console_error_panic_hook::set_once();
        let level = if debug { log::Level::Debug } else { log::Level::Info };
        let _ = console_log::init_with_level(level);

        let config = match config_json.as_deref() {
            Some(json) => EngineConfig::from_json(json).unwrap_or_else(|err| {
                log::warn!("invalid backdrop config, using defaults: {}", err);
                EngineConfig::default()
            }),
            None => EngineConfig::default(),
        };
        Backdrop { runner: BackdropRunner::new(config) }
    }

    pub fn mount(&mut self, canvas: HtmlCanvasElement) {
        self.runner.mount(canvas);
    }

    /// Fade the backdrop in (`true`) or out (`false`).
    pub fn activate(&self, active: bool) {
        self.runner.activate(active);
    }

    pub fn teardown(&mut self) {
        self.runner.teardown();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// Current particle counts and opacity as a JSON string.
    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.runner.stats()).unwrap_or_else(|err| {
            log::warn!("failed to serialize stats: {}", err);
            String::from("{}")
        })
    }
}
