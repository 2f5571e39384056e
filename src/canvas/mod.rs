pub mod background;
pub mod renderer;
pub mod viewport;

/// The handful of immediate-mode drawing operations the ambient background
/// needs.  Coordinates are logical (CSS) pixels; the scale transform set via
/// `set_scale` maps them onto the backing store.
pub trait Surface {
    /// Resize the backing store (device pixels).
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, ratio: f64);

    fn clear(&mut self, width: f64, height: f64);

    /// Radial gradient disc fading from `color` at the centre to fully
    /// transparent at `radius`.
    fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: &str);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, width: f64);
}
