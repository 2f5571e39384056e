use std::f64::consts::TAU;

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::constants::ORB_FADE_COLOR;

/// `Surface` over a real `<canvas>` 2D context.
pub struct WebSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl WebSurface {
    /// Acquire the 2D context.  Returns `None` when the browser refuses to
    /// hand one out, in which case the caller simply skips the animation.
    pub fn acquire(canvas: HtmlCanvasElement) -> Option<Self> {
        let options = Object::new();
        let _ = Reflect::set(&options, &"alpha".into(), &JsValue::TRUE);
        let _ = Reflect::set(&options, &"desynchronized".into(), &JsValue::TRUE);

        let context = canvas
            .get_context_with_context_options("2d", &options)
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(Self { canvas, context })
    }
}

impl Surface for WebSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn set_scale(&mut self, ratio: f64) {
        let _ = self.context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        let gradient = match self.context.create_radial_gradient(x, y, 0.0, x, y, radius) {
            Ok(g) => g,
            Err(_) => return,
        };
        if gradient.add_color_stop(0.0, color).is_err()
            || gradient.add_color_stop(1.0, ORB_FADE_COLOR).is_err()
        {
            return;
        }
        #[allow(deprecated)]
        self.context.set_fill_style(&gradient);
        self.context.begin_path();
        let _ = self.context.arc(x, y, radius, 0.0, TAU);
        self.context.fill();
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        let _ = self.context.arc(x, y, radius, 0.0, TAU);
        self.context.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64) {
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from.0, from.1);
        self.context.line_to(to.0, to.1);
        self.context.stroke();
    }
}
