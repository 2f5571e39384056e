//! Ambient canvas controller.
//!
//! `AmbientCanvas` owns everything the background animation needs: the
//! particle field, the current viewport, the throttle clock, the drawing
//! surface and the frame task.  It is generic over `Surface` and
//! `FrameScheduler` so the whole loop can be driven from unit tests; the
//! browser wiring lives in `web.rs`.

pub mod web;

use rand::Rng;

use crate::canvas::background::ParticleField;
use crate::canvas::viewport::Viewport;
use crate::canvas::Surface;
use crate::config::AmbientConfig;
use crate::scheduling::{AnimationClock, FrameScheduler, FrameTask};

/// What a fired frame ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// Throttled or paused; nothing was updated or drawn.
    Skipped,
}

pub struct AmbientCanvas<S: Surface, F: FrameScheduler> {
    config: AmbientConfig,
    field: ParticleField,
    viewport: Viewport,
    clock: AnimationClock,
    surface: S,
    task: FrameTask<F>,
}

impl<S: Surface, F: FrameScheduler> AmbientCanvas<S, F> {
    /// Build the field and size the surface for `viewport`.  The loop is not
    /// started; call `start()`.
    pub fn new<R: Rng + ?Sized>(
        config: AmbientConfig,
        viewport: Viewport,
        surface: S,
        scheduler: F,
        rng: &mut R,
    ) -> Self {
        let field = ParticleField::generate(&config, rng);
        let clock = AnimationClock::new(config.frame_interval_ms);
        let mut canvas = Self {
            config,
            field,
            viewport,
            clock,
            surface,
            task: FrameTask::new(scheduler),
        };
        canvas.apply_viewport(viewport);
        canvas
    }

    pub fn start(&mut self) -> bool {
        self.task.schedule()
    }

    /// The frame callback.  Always reschedules itself before returning.
    pub fn on_frame(&mut self, timestamp: f64) -> FrameOutcome {
        self.task.begin_frame();
        let outcome = if self.clock.admit(timestamp) {
            self.render();
            FrameOutcome::Rendered
        } else {
            FrameOutcome::Skipped
        };
        self.task.schedule();
        outcome
    }

    fn render(&mut self) {
        self.surface.clear(self.viewport.width, self.viewport.height);
        self.field.update();
        self.field.draw(&mut self.surface, &self.viewport);
    }

    /// Page visibility changed.  Hidden cancels the pending frame; visible
    /// resets the clock and schedules exactly one fresh frame.
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if hidden {
            if self.task.cancel() {
                crate::debug_log!("ambient: paused while hidden");
            }
        } else {
            self.clock.reset();
            self.task.schedule();
        }
    }

    /// A scroll tick at `now`.  Pushes the pause deadline forward when the
    /// variant pauses on scroll.
    pub fn on_scroll(&mut self, now: f64) {
        if self.config.pause_on_scroll {
            self.clock.pause_for(now, self.config.scroll_pause_ms);
        }
    }

    /// Commit a (debounced) resize.  Particle state is left untouched.
    pub fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (width, height) = viewport.backing_size();
        self.surface.set_backing_size(width, height);
        self.surface.set_scale(viewport.ratio);
    }

    pub fn config(&self) -> &AmbientConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn task(&self) -> &FrameTask<F> {
        &self.task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{DrawOp, RecordingSurface};
    use crate::config::Variant;
    use crate::scheduling::tests::ManualScheduler;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn canvas(variant: Variant) -> AmbientCanvas<RecordingSurface, ManualScheduler> {
        let config = AmbientConfig::preset(variant);
        let viewport = Viewport::new(1920.0, 1080.0, 1.0, config.max_pixel_ratio);
        AmbientCanvas::new(
            config,
            viewport,
            RecordingSurface::default(),
            ManualScheduler::default(),
            &mut StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn construction_sizes_backing_store() {
        let c = canvas(Variant::Orbital);
        assert_eq!(
            c.surface().ops,
            vec![DrawOp::BackingSize(1920, 1080), DrawOp::Scale(1.0)]
        );
        assert!(!c.task().is_scheduled());
    }

    #[test]
    fn first_frame_renders_and_reschedules() {
        let mut c = canvas(Variant::Orbital);
        c.start();
        assert_eq!(c.on_frame(16.0), FrameOutcome::Rendered);
        assert!(c.task().is_scheduled());
        assert_eq!(c.task().scheduler().requested.len(), 2);
        let glows = c
            .surface()
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Glow { .. }))
            .count();
        assert_eq!(glows, 6);
    }

    #[test]
    fn throttled_frame_leaves_state_alone() {
        let mut c = canvas(Variant::Constellation);
        c.start();
        c.on_frame(0.0);
        let field = c.field().clone();
        let ops = c.surface().ops.len();
        assert_eq!(c.on_frame(10.0), FrameOutcome::Skipped);
        assert_eq!(c.field(), &field);
        assert_eq!(c.surface().ops.len(), ops);
        assert!(c.task().is_scheduled());
    }

    #[test]
    fn scroll_pauses_orbital_only() {
        let mut orbital = canvas(Variant::Orbital);
        orbital.on_frame(0.0);
        orbital.on_scroll(100.0);
        assert_eq!(orbital.on_frame(200.0), FrameOutcome::Skipped);
        assert_eq!(orbital.on_frame(300.0), FrameOutcome::Rendered);

        let mut constellation = canvas(Variant::Constellation);
        constellation.on_frame(0.0);
        constellation.on_scroll(100.0);
        assert_eq!(constellation.on_frame(200.0), FrameOutcome::Rendered);
    }

    #[test]
    fn hide_cancels_and_show_restarts_once() {
        let mut c = canvas(Variant::Orbital);
        c.start();
        c.on_frame(1000.0);
        c.on_visibility_change(true);
        assert!(!c.task().is_scheduled());
        assert_eq!(c.task().scheduler().cancelled, vec![2]);

        c.on_visibility_change(false);
        c.on_visibility_change(false);
        assert_eq!(c.task().scheduler().requested.len(), 3);
        // Only 1 ms after the last render, but the clock was reset.
        assert_eq!(c.on_frame(1001.0), FrameOutcome::Rendered);
    }

    #[test]
    fn resize_keeps_particles() {
        let mut c = canvas(Variant::Constellation);
        let field = c.field().clone();
        c.apply_viewport(Viewport::new(1280.0, 720.0, 3.0, c.config().max_pixel_ratio));
        assert_eq!(c.field(), &field);
        assert_eq!(
            c.surface().ops[c.surface().ops.len() - 2..],
            [DrawOp::BackingSize(1920, 1080), DrawOp::Scale(1.5)]
        );
        assert_eq!(c.viewport().width, 1280.0);
    }
}
