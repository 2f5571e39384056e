use web_sys::Window;

/// Logical viewport size plus the (clamped) device pixel ratio used for the
/// canvas backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
}

impl Viewport {
    /// `device_ratio` is clamped to `max_ratio`; non-finite or non-positive
    /// ratios fall back to 1.
    pub fn new(width: f64, height: f64, device_ratio: f64, max_ratio: f64) -> Self {
        let ratio = if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ratio: ratio.min(max_ratio),
        }
    }

    pub fn from_window(window: &Window, max_ratio: f64) -> Self {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Self::new(
            dim(window.inner_width()),
            dim(window.inner_height()),
            window.device_pixel_ratio(),
            max_ratio,
        )
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.ratio).floor() as u32,
            (self.height * self.ratio).floor() as u32,
        )
    }
}
