//! Mobile navigation toggle.  Open/closed state lives in the DOM (`open`
//! class on both the menu and its toggle button).

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::dom_utils::{aria_bool, has_class, on, query, set_class};

pub struct NavMenu {
    toggle: Option<Element>,
    menu: Option<Element>,
}

impl NavMenu {
    /// `None` when the page has neither `.nav-toggle` nor `.nav`.
    pub fn find(document: &Document) -> Option<Self> {
        let toggle = query(document, ".nav-toggle");
        let menu = query(document, ".nav");
        if toggle.is_none() && menu.is_none() {
            return None;
        }
        Some(Self { toggle, menu })
    }

    pub fn is_open(&self) -> bool {
        self.menu
            .as_ref()
            .or(self.toggle.as_ref())
            .map_or(false, |el| has_class(el, "open"))
    }

    pub fn set_open(&self, open: bool) {
        if let Some(menu) = &self.menu {
            set_class(menu, "open", open);
        }
        if let Some(toggle) = &self.toggle {
            set_class(toggle, "open", open);
            let _ = toggle.set_attribute("aria-expanded", aria_bool(open));
        }
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn close(&self) {
        if self.is_open() {
            self.set_open(false);
        }
    }
}

/// Toggle on click, close on `Escape`.
pub fn attach(document: &Document, nav: &Rc<NavMenu>) -> Result<(), JsValue> {
    if let Some(toggle) = &nav.toggle {
        let nav = nav.clone();
        on(toggle, "click", move |_e: Event| nav.toggle())?;
    }

    let nav = nav.clone();
    let keydown = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() == "Escape" {
            nav.close();
        }
    }));
    document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
    keydown.forget();
    Ok(())
}
