//! Page interaction layer.
//!
//! Plain event-driven DOM glue; every handler is a no-op when the element it
//! targets is missing from the page.

pub mod contact;
pub mod nav;
pub mod reveal;
pub mod scroll;

use std::rc::Rc;

use chrono::Datelike;
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::dom_utils::set_class;
use crate::environment::MotionPreference;

/// Entry point – call once after the document is available.  Attaches all
/// page-level handlers.
pub fn setup_page_interactions(
    window: &Window,
    document: &Document,
    preference: MotionPreference,
) -> Result<(), JsValue> {
    if let Some(body) = document.body() {
        set_class(&body, "low-power", preference.low_power);
    }

    let nav = nav::NavMenu::find(document).map(Rc::new);
    if let Some(nav) = &nav {
        nav::attach(document, nav)?;
    }

    scroll::attach_scroll_buttons(window, document, preference, nav)?;
    scroll::attach_scroll_progress(window, document, preference)?;
    fill_year(document);
    reveal::setup_reveal(window, document, preference)?;
    contact::setup_contact_guard(window, document)?;
    Ok(())
}

/// `#year` in the footer.
fn fill_year(document: &Document) {
    if let Some(el) = document.get_element_by_id("year") {
        el.set_text_content(Some(&chrono::Local::now().year().to_string()));
    }
}
