//! dom_utils.rs – thin helper layer for repetitive DOM operations used by the
//! page interaction handlers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

/// All elements matching `selector`, in document order.  An invalid
/// selector yields an empty list.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Add or remove `class` depending on `on`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on { list.add_1(class) } else { list.remove_1(class) };
}

/// `"true"` / `"false"` for ARIA boolean attributes.
pub fn aria_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub fn set_style_property(el: &HtmlElement, name: &str, value: &str) {
    let _ = el.style().set_property(name, value);
}

/// Attach a plain (non-passive) listener that lives for the page lifetime.
pub fn on(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(handler));
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Attach a passive listener (scroll, resize, visibility) that lives for the
/// page lifetime.
pub fn listen_passive(
    target: &EventTarget,
    event: &str,
    callback: Closure<dyn FnMut(Event)>,
) -> Result<(), JsValue> {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
