use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::ambient::web::{mount, WebAmbientCanvas};
use crate::environment::{EnvironmentSignals, MotionPreference};
use crate::{debug_log, ui};

/// Everything the page runs, built once at start-up.  The interaction layer
/// and the ambient canvas both receive the same `MotionPreference` from
/// here.
pub struct SiteController {
    pub window: Window,
    pub document: Document,
    pub signals: EnvironmentSignals,
    pub preference: MotionPreference,
    pub ambient: Option<Rc<RefCell<WebAmbientCanvas>>>,
}

impl SiteController {
    pub fn boot() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let signals = EnvironmentSignals::read(&window);
        let preference = signals.preference();
        debug_log!("environment: {:?}", signals);

        ui::setup_page_interactions(&window, &document, preference)?;
        let ambient = mount(&window, &document, &signals)?;

        Ok(Self {
            window,
            document,
            signals,
            preference,
            ambient,
        })
    }

    pub fn is_animating(&self) -> bool {
        self.ambient.is_some()
    }
}
