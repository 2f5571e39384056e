//! Contact form submit guard – after the first submit the button is
//! disabled and relabelled so the form cannot be sent twice.

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlButtonElement, Window};

use crate::constants::SUBMIT_PENDING_LABEL;
use crate::dom_utils::{on, query};

/// Bind the guard once the page has finished loading (immediately when it
/// already has).
pub fn setup_contact_guard(window: &Window, document: &Document) -> Result<(), JsValue> {
    let ready_state = Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|v| v.as_string());
    if ready_state.as_deref() == Some("complete") {
        return bind(document);
    }

    let doc = document.clone();
    let on_load = Closure::once_into_js(move || {
        if let Err(e) = bind(&doc) {
            crate::warn_log!("contact guard: {:?}", e);
        }
    });
    window.add_event_listener_with_callback("load", on_load.unchecked_ref())
}

fn bind(document: &Document) -> Result<(), JsValue> {
    let form = match query(document, ".contact-card") {
        Some(f) => f,
        None => return Ok(()),
    };
    let target = form.clone();
    on(&form, "submit", move |_e: Event| {
        if let Ok(Some(button)) = target.query_selector("button[type='submit']") {
            guard_submit_button(&button);
        }
    })
}

pub fn guard_submit_button(button: &Element) {
    match button.dyn_ref::<HtmlButtonElement>() {
        Some(b) => b.set_disabled(true),
        None => {
            let _ = button.set_attribute("disabled", "");
        }
    }
    button.set_text_content(Some(SUBMIT_PENDING_LABEL));
}
