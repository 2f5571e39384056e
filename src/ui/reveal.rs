//! Reveal-on-scroll: `.reveal` elements receive `is-visible` the first time
//! they intersect the viewport.

use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::constants::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::dom_utils::{query_all, set_class};
use crate::environment::MotionPreference;

const VISIBLE_CLASS: &str = "is-visible";

/// Observe only when the browser can and the user has not asked for less
/// motion; otherwise everything is shown up front.
pub fn should_observe(observer_supported: bool, preference: &MotionPreference) -> bool {
    observer_supported && !preference.reduced_motion
}

pub fn setup_reveal(
    window: &Window,
    document: &Document,
    preference: MotionPreference,
) -> Result<(), JsValue> {
    let items = query_all(document, ".reveal");
    if items.is_empty() {
        return Ok(());
    }

    let supported = Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false);
    if !should_observe(supported, &preference) {
        for item in &items {
            set_class(item, VISIBLE_CLASS, true);
        }
        return Ok(());
    }

    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::wrap(Box::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    set_class(&target, VISIBLE_CLASS, true);
                    observer.unobserve(&target);
                }
            }
        },
    ));

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    init.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)?;
    on_intersect.forget();

    for item in &items {
        observer.observe(item);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_gate() {
        let calm = MotionPreference { reduced_motion: true, low_power: true };
        assert!(should_observe(true, &MotionPreference::default()));
        assert!(!should_observe(false, &MotionPreference::default()));
        assert!(!should_observe(true, &calm));
    }
}
