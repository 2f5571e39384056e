//! Browser wiring for the ambient canvas: finds the `<canvas>`, applies the
//! one-time gate, and hooks frame / visibility / scroll / resize events up to
//! an `AmbientCanvas`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlCanvasElement, Window};

use super::AmbientCanvas;
use crate::canvas::renderer::WebSurface;
use crate::canvas::viewport::Viewport;
use crate::config::{AmbientConfig, Variant};
use crate::dom_utils::listen_passive;
use crate::environment::EnvironmentSignals;
use crate::scheduling::RafScheduler;
use crate::{debug_log, mut_borrow, warn_log};

pub type WebAmbientCanvas = AmbientCanvas<WebSurface, RafScheduler>;

const CANVAS_SELECTOR: &str = "#orbitalCanvas, canvas[data-ambient]";

/// Locate the ambient canvas and start it when the environment allows.
///
/// Returns `Ok(None)` when there is no canvas, the gate refuses, or no 2D
/// context is available – none of these are errors.
pub fn mount(
    window: &Window,
    document: &Document,
    signals: &EnvironmentSignals,
) -> Result<Option<Rc<RefCell<WebAmbientCanvas>>>, JsValue> {
    let canvas = match document
        .query_selector(CANVAS_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
    {
        Some(c) => c,
        None => return Ok(None),
    };

    let config = read_config(&canvas);
    if !signals.should_animate(config.min_viewport_width) {
        debug_log!(
            "ambient: disabled (low_power={}, width={})",
            signals.is_low_power(),
            signals.viewport_width
        );
        return Ok(None);
    }

    let surface = match WebSurface::acquire(canvas) {
        Some(s) => s,
        None => return Ok(None),
    };

    let viewport = Viewport::from_window(window, config.max_pixel_ratio);
    let mut rng = StdRng::from_entropy();

    let ambient = Rc::new_cyclic(|weak: &Weak<RefCell<WebAmbientCanvas>>| {
        let frame_target = weak.clone();
        let on_frame = Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(ambient) = frame_target.upgrade() {
                mut_borrow!(ambient).on_frame(timestamp);
            }
        }) as Box<dyn FnMut(f64)>);
        let scheduler = RafScheduler::new(window.clone(), on_frame);
        RefCell::new(AmbientCanvas::new(config, viewport, surface, scheduler, &mut rng))
    });

    attach_visibility_handler(document, &ambient)?;
    attach_resize_handler(window, &ambient)?;
    if ambient.borrow().config().pause_on_scroll {
        attach_scroll_pause_handler(window, &ambient)?;
    }

    mut_borrow!(ambient).start();
    debug_log!(
        "ambient: started {:?} with {} particles",
        ambient.borrow().config().variant,
        ambient.borrow().field().len()
    );
    Ok(Some(ambient))
}

/// Variant from `data-variant` (defaults to orbital), then JSON overrides
/// from `data-ambient-config`.
fn read_config(canvas: &HtmlCanvasElement) -> AmbientConfig {
    let variant = canvas
        .get_attribute("data-variant")
        .and_then(|v| Variant::parse(&v))
        .unwrap_or(Variant::Orbital);

    match canvas.get_attribute("data-ambient-config") {
        Some(json) => AmbientConfig::from_overrides_json(variant, &json).unwrap_or_else(|e| {
            warn_log!("ambient: {}; using {:?} preset", e, variant);
            AmbientConfig::preset(variant)
        }),
        None => AmbientConfig::preset(variant),
    }
}

fn attach_visibility_handler(
    document: &Document,
    ambient: &Rc<RefCell<WebAmbientCanvas>>,
) -> Result<(), JsValue> {
    let ambient = ambient.clone();
    let doc = document.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
        mut_borrow!(ambient).on_visibility_change(doc.hidden());
    }));
    listen_passive(document.as_ref(), "visibilitychange", cb)
}

fn attach_scroll_pause_handler(
    window: &Window,
    ambient: &Rc<RefCell<WebAmbientCanvas>>,
) -> Result<(), JsValue> {
    let ambient = ambient.clone();
    let performance = window.performance();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
        if let Some(perf) = &performance {
            mut_borrow!(ambient).on_scroll(perf.now());
        }
    }));
    listen_passive(window.as_ref(), "scroll", cb)
}

fn attach_resize_handler(
    window: &Window,
    ambient: &Rc<RefCell<WebAmbientCanvas>>,
) -> Result<(), JsValue> {
    let delay = ambient.borrow().config().resize_debounce_ms;
    let max_ratio = ambient.borrow().config().max_pixel_ratio;
    let debouncer = Rc::new(RefCell::new(Debouncer::new(delay)));
    let ambient = ambient.clone();
    let win = window.clone();
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |_e: Event| {
        let ambient = ambient.clone();
        let win = win.clone();
        mut_borrow!(debouncer).call(move || {
            mut_borrow!(ambient).apply_viewport(Viewport::from_window(&win, max_ratio));
        });
    }));
    listen_passive(window.as_ref(), "resize", cb)
}

/// Trailing-edge debounce: only the last call inside the settle window runs.
pub struct Debouncer {
    delay_ms: u32,
    pending: Option<Timeout>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Replace any pending call with `f`.  Dropping the previous `Timeout`
    /// clears it.
    pub fn call<F: FnOnce() + 'static>(&mut self, f: F) {
        self.pending = Some(Timeout::new(self.delay_ms, f));
    }
}
