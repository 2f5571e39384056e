//! Drives the ambient background loop end to end through the public
//! `Surface` / `FrameScheduler` seams, without a browser.

use ambient_landing::ambient::{AmbientCanvas, FrameOutcome};
use ambient_landing::canvas::background::ParticleField;
use ambient_landing::canvas::viewport::Viewport;
use ambient_landing::canvas::Surface;
use ambient_landing::config::{AmbientConfig, Variant};
use ambient_landing::scheduling::{FrameHandle, FrameScheduler};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct CountingSurface {
    backing: (u32, u32),
    scale: f64,
    clears: usize,
    glows: usize,
    circles: usize,
    lines: Vec<f64>,
}

impl Surface for CountingSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
    }
    fn set_scale(&mut self, ratio: f64) {
        self.scale = ratio;
    }
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
    }
    fn fill_glow(&mut self, _x: f64, _y: f64, _radius: f64, _color: &str) {
        self.glows += 1;
    }
    fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: &str) {
        self.circles += 1;
    }
    fn stroke_line(&mut self, _from: (f64, f64), _to: (f64, f64), color: &str, _width: f64) {
        // "rgba(r,g,b,a)" -> a
        let alpha = color
            .trim_end_matches(')')
            .rsplit(',')
            .next()
            .and_then(|a| a.parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        self.lines.push(alpha);
    }
}

#[derive(Default)]
struct Frames {
    requested: usize,
    cancelled: Vec<FrameHandle>,
}

impl FrameScheduler for Frames {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.requested += 1;
        Some(self.requested as FrameHandle)
    }
    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

fn build(variant: Variant, seed: u64) -> AmbientCanvas<CountingSurface, Frames> {
    let config = AmbientConfig::preset(variant);
    let viewport = Viewport::new(1920.0, 1080.0, 1.0, config.max_pixel_ratio);
    AmbientCanvas::new(
        config,
        viewport,
        CountingSurface::default(),
        Frames::default(),
        &mut StdRng::seed_from_u64(seed),
    )
}

#[test]
fn full_hd_backing_store_matches_viewport() {
    let canvas = build(Variant::Constellation, 3);
    assert_eq!(canvas.surface().backing, (1920, 1080));
    assert_eq!(canvas.surface().scale, 1.0);
}

#[test]
fn constellation_runs_many_frames_inside_the_unit_square() {
    let mut canvas = build(Variant::Constellation, 11);
    canvas.start();
    let mut t = 0.0;
    for _ in 0..2_000 {
        t += 16.7;
        canvas.on_frame(t);
    }
    match canvas.field() {
        ParticleField::Constellation(c) => {
            for p in &c.points {
                assert!((0.0..=1.0).contains(&p.x), "x out of range: {}", p.x);
                assert!((0.0..=1.0).contains(&p.y), "y out of range: {}", p.y);
            }
        }
        other => panic!("unexpected field {:?}", other),
    }
    let surface = canvas.surface();
    assert!(surface.clears > 0);
    assert_eq!(surface.circles, surface.clears * canvas.field().len());
    for alpha in &surface.lines {
        assert!(*alpha >= 0.0 && *alpha <= 0.22, "edge opacity {}", alpha);
    }
}

#[test]
fn each_fired_frame_registers_exactly_one_successor() {
    let mut canvas = build(Variant::Orbital, 5);
    assert!(canvas.start());
    assert!(!canvas.start());
    for i in 1..=50 {
        canvas.on_frame(i as f64 * 16.0);
        assert!(canvas.task().is_scheduled());
        assert_eq!(canvas.task().scheduler().requested, 1 + i);
    }
    let surface = canvas.surface();
    assert!(surface.clears > 0);
    assert_eq!(surface.glows, surface.clears * 6);
}

#[test]
fn hidden_page_stops_and_visible_page_restarts_fresh() {
    let mut canvas = build(Variant::Orbital, 9);
    canvas.start();
    assert_eq!(canvas.on_frame(100.0), FrameOutcome::Rendered);

    canvas.on_visibility_change(true);
    assert!(!canvas.task().is_scheduled());
    assert_eq!(canvas.task().scheduler().cancelled, vec![2]);

    let before = canvas.field().clone();
    canvas.on_visibility_change(false);
    assert!(canvas.task().is_scheduled());
    assert_eq!(canvas.on_frame(101.0), FrameOutcome::Rendered);
    assert_ne!(canvas.field(), &before);
}

#[test]
fn page_overrides_flow_into_the_field() {
    let config =
        AmbientConfig::from_overrides_json(Variant::Constellation, r#"{"particleCount": 5}"#)
            .unwrap();
    let viewport = Viewport::new(1000.0, 800.0, 2.0, config.max_pixel_ratio);
    let canvas = AmbientCanvas::new(
        config,
        viewport,
        CountingSurface::default(),
        Frames::default(),
        &mut StdRng::seed_from_u64(0),
    );
    assert_eq!(canvas.field().len(), 5);
    assert_eq!(canvas.surface().backing, (1500, 1200));
}
