//! Frame scheduling – an explicit, cancellable handle around the browser's
//! per-frame callback plus the throttle clock that decides whether a fired
//! frame actually renders.
//!
//! The loop contract is cooperative: a frame callback must call
//! `FrameTask::begin_frame()` first and `FrameTask::schedule()` before it
//! returns, otherwise the loop stops.  `FrameTask::cancel()` drops the pending
//! registration; `schedule()` never registers more than one frame at a time.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Opaque id returned by the scheduler (the rAF request id in the browser).
pub type FrameHandle = i32;

/// Something that can run "the" frame callback once on the next frame.
pub trait FrameScheduler {
    /// Register one call of the frame callback.  `None` when the platform
    /// refused the request.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A repeating frame task that can be started, cancelled and restarted.
pub struct FrameTask<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameHandle>,
}

impl<S: FrameScheduler> FrameTask<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Register the next frame unless one is already pending.  Returns
    /// whether a new registration was made.
    pub fn schedule(&mut self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = self.scheduler.request_frame();
        self.pending.is_some()
    }

    /// Cancel the pending frame, if any.  Returns whether something was
    /// cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                self.scheduler.cancel_frame(handle);
                true
            }
            None => false,
        }
    }

    /// The pending frame just fired; it is no longer cancellable.
    pub fn begin_frame(&mut self) {
        self.pending = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

// ---------------------------------------------------------------------------
// Browser scheduler
// ---------------------------------------------------------------------------

/// `requestAnimationFrame` backed scheduler.  The callback closure is owned
/// here so it lives exactly as long as the task using it.
pub struct RafScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: Window, callback: Closure<dyn FnMut(f64)>) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle);
    }
}

// ---------------------------------------------------------------------------
// Throttle clock
// ---------------------------------------------------------------------------

/// Decides which fired frames render.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClock {
    frame_interval_ms: f64,
    last_frame: Option<f64>,
    pause_until: f64,
}

impl AnimationClock {
    pub fn new(frame_interval_ms: f64) -> Self {
        Self {
            frame_interval_ms,
            last_frame: None,
            pause_until: f64::NEG_INFINITY,
        }
    }

    /// Returns `true` and records `timestamp` when a frame at `timestamp`
    /// should render.  Frames inside the pause window or closer than the
    /// frame interval to the last rendered one are rejected without any
    /// state change.
    pub fn admit(&mut self, timestamp: f64) -> bool {
        if timestamp < self.pause_until {
            return false;
        }
        if let Some(last) = self.last_frame {
            if timestamp - last < self.frame_interval_ms {
                return false;
            }
        }
        self.last_frame = Some(timestamp);
        true
    }

    /// Suspend rendering until `now + duration_ms`.  Repeated calls push the
    /// deadline forward.
    pub fn pause_for(&mut self, now: f64, duration_ms: f64) {
        self.pause_until = now + duration_ms;
    }

    /// Forget the last rendered frame and any pause so the next frame always
    /// renders.
    pub fn reset(&mut self) {
        self.last_frame = None;
        self.pause_until = f64::NEG_INFINITY;
    }

    pub fn last_frame(&self) -> Option<f64> {
        self.last_frame
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records requests / cancellations instead of talking to a browser.
    #[derive(Debug, Default)]
    pub(crate) struct ManualScheduler {
        pub next_id: FrameHandle,
        pub requested: Vec<FrameHandle>,
        pub cancelled: Vec<FrameHandle>,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&mut self) -> Option<FrameHandle> {
            self.next_id += 1;
            self.requested.push(self.next_id);
            Some(self.next_id)
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn schedule_is_idempotent_while_pending() {
        let mut task = FrameTask::new(ManualScheduler::default());
        assert!(task.schedule());
        assert!(!task.schedule());
        assert_eq!(task.scheduler().requested.len(), 1);
    }

    #[test]
    fn cancel_releases_the_pending_handle() {
        let mut task = FrameTask::new(ManualScheduler::default());
        task.schedule();
        assert!(task.cancel());
        assert!(!task.is_scheduled());
        assert_eq!(task.scheduler().cancelled, vec![1]);
        assert!(!task.cancel());
    }

    #[test]
    fn fired_frame_cannot_be_cancelled() {
        let mut task = FrameTask::new(ManualScheduler::default());
        task.schedule();
        task.begin_frame();
        assert!(!task.cancel());
        assert!(task.scheduler().cancelled.is_empty());
    }

    #[test]
    fn clock_throttles_by_interval() {
        let mut clock = AnimationClock::new(40.0);
        assert!(clock.admit(1000.0));
        assert!(!clock.admit(1016.0));
        assert!(!clock.admit(1039.9));
        assert!(clock.admit(1040.0));
        assert_eq!(clock.last_frame(), Some(1040.0));
    }

    #[test]
    fn rejected_frames_do_not_move_the_clock() {
        let mut clock = AnimationClock::new(40.0);
        clock.admit(0.0);
        clock.admit(20.0);
        assert_eq!(clock.last_frame(), Some(0.0));
    }

    #[test]
    fn pause_window_blocks_until_deadline() {
        let mut clock = AnimationClock::new(0.0);
        clock.pause_for(100.0, 180.0);
        assert!(!clock.admit(200.0));
        clock.pause_for(250.0, 180.0);
        assert!(!clock.admit(300.0));
        assert!(clock.admit(430.0));
    }

    #[test]
    fn reset_admits_next_frame_immediately() {
        let mut clock = AnimationClock::new(1_000.0);
        clock.admit(5_000.0);
        clock.pause_for(5_000.0, 180.0);
        clock.reset();
        assert!(clock.admit(5_001.0));
    }
}
