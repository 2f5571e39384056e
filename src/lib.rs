use wasm_bindgen::prelude::*;

pub mod macros;

pub mod ambient;
pub mod app;
pub mod canvas;
pub mod config;
pub mod constants;
pub mod dom_utils;
pub mod environment;
pub mod scheduling;
pub mod ui;

// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    match app::SiteController::boot() {
        Ok(site) => {
            debug_log!(
                "landing page ready (animating={}, low_power={})",
                site.is_animating(),
                site.preference.low_power
            );
        }
        Err(e) => {
            // A broken enhancement must never take the page down with it.
            warn_log!("landing page setup failed: {:?}", e);
        }
    }
    Ok(())
}
