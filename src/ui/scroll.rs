//! Scroll-related page behavior: `[data-scroll-to]` buttons and the
//! `--scroll-y` / `--scroll-progress` custom properties.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use super::nav::NavMenu;
use crate::dom_utils::{listen_passive, on, query, query_all, set_style_property};
use crate::environment::MotionPreference;

/// Fraction of the scrollable distance already scrolled, in `[0, 1]`.
/// Non-scrollable documents report 0.
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !(scrollable > 0.0) {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

/// Absolute scroll position that puts an element whose viewport-relative top
/// is `element_top` just below a fixed header of `header_offset` pixels.
pub fn scroll_target_top(element_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    (element_top + scroll_y - header_offset).max(0.0)
}

pub fn scroll_behavior(preference: &MotionPreference) -> ScrollBehavior {
    if preference.prefers_instant_scroll() {
        ScrollBehavior::Auto
    } else {
        ScrollBehavior::Smooth
    }
}

fn header_offset(document: &Document) -> f64 {
    query(document, ".site-header")
        .map(|h| h.get_bounding_client_rect().height())
        .unwrap_or(0.0)
}

/// Every `[data-scroll-to]` element scrolls to its target selector and
/// closes the mobile menu.
pub fn attach_scroll_buttons(
    window: &Window,
    document: &Document,
    preference: MotionPreference,
    nav: Option<Rc<NavMenu>>,
) -> Result<(), JsValue> {
    for button in query_all(document, "[data-scroll-to]") {
        let selector = match button.get_attribute("data-scroll-to") {
            Some(s) if !s.trim().is_empty() => s,
            _ => continue,
        };
        let window = window.clone();
        let document = document.clone();
        let nav = nav.clone();
        on(&button, "click", move |e: Event| {
            e.prevent_default();
            if let Some(target) = query(&document, &selector) {
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                let top = scroll_target_top(
                    target.get_bounding_client_rect().top(),
                    scroll_y,
                    header_offset(&document),
                );
                let options = ScrollToOptions::new();
                options.set_top(top);
                options.set_behavior(scroll_behavior(&preference));
                window.scroll_to_with_scroll_to_options(&options);
            }
            if let Some(nav) = &nav {
                nav.close();
            }
        })?;
    }
    Ok(())
}

fn write_scroll_vars(window: &Window, document: &Document) {
    let body = match document.body() {
        Some(b) => b,
        None => return,
    };
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let progress = scroll_progress(scroll_y, document_height, viewport_height);

    set_style_property(&body, "--scroll-y", &format!("{}px", scroll_y));
    set_style_property(&body, "--scroll-progress", &format!("{:.4}", progress));
    if let Some(bar) = query(document, ".scroll-progress").and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
        set_style_property(&bar, "transform", &format!("scaleX({:.4})", progress));
    }
}

/// Keep the scroll custom properties current, coalescing scroll events into
/// at most one update per animation frame.  Skipped entirely on low-power
/// devices.
pub fn attach_scroll_progress(
    window: &Window,
    document: &Document,
    preference: MotionPreference,
) -> Result<(), JsValue> {
    if preference.low_power {
        return Ok(());
    }
    write_scroll_vars(window, document);

    let ticking = Rc::new(Cell::new(false));
    let update = {
        let window = window.clone();
        let document = document.clone();
        let ticking = ticking.clone();
        Rc::new(Closure::<dyn FnMut()>::wrap(Box::new(move || {
            write_scroll_vars(&window, &document);
            ticking.set(false);
        })))
    };

    let win = window.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
        if ticking.get() {
            return;
        }
        let update: &Closure<dyn FnMut()> = &update;
        if win.request_animation_frame(update.as_ref().unchecked_ref()).is_ok() {
            ticking.set(true);
        }
    }));
    listen_passive(window.as_ref(), "scroll", cb)
}
