//! Power / accessibility signals read once at start-up.
//!
//! Both the interaction layer and the ambient canvas consult the same
//! `MotionPreference` so they always agree on whether motion is welcome.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::constants::{LOW_POWER_CPU_COUNT, LOW_POWER_MEMORY_GB, REDUCED_MOTION_QUERY};

/// Raw values sampled from the browser.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentSignals {
    pub reduced_motion: bool,
    pub save_data: bool,
    /// `navigator.deviceMemory` in GiB, `None` when not reported.
    pub device_memory: Option<f64>,
    /// `navigator.hardwareConcurrency`, `None` when not reported.
    pub hardware_concurrency: Option<f64>,
    pub viewport_width: f64,
}

/// What the page should do with motion, derived from `EnvironmentSignals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPreference {
    pub reduced_motion: bool,
    pub low_power: bool,
}

impl MotionPreference {
    /// Instant scroll jumps instead of smooth ones.
    pub fn prefers_instant_scroll(&self) -> bool {
        self.reduced_motion || self.low_power
    }
}

impl EnvironmentSignals {
    /// Sample every signal from `window`.  Missing APIs read as "not
    /// reported" and never mark the device as constrained.
    pub fn read(window: &Window) -> Self {
        let reduced_motion = window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|mql| mql.matches())
            .unwrap_or(false);

        let navigator = window.navigator();
        let navigator_js: &JsValue = navigator.as_ref();

        let save_data = ["connection", "mozConnection", "webkitConnection"]
            .iter()
            .filter_map(|key| Reflect::get(navigator_js, &JsValue::from_str(key)).ok())
            .find(|conn| conn.is_object())
            .and_then(|conn| Reflect::get(&conn, &JsValue::from_str("saveData")).ok())
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let device_memory = Reflect::get(navigator_js, &JsValue::from_str("deviceMemory"))
            .ok()
            .and_then(|v| v.as_f64());

        let hardware_concurrency = Some(navigator.hardware_concurrency());

        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);

        Self {
            reduced_motion,
            save_data,
            device_memory: reported(device_memory),
            hardware_concurrency: reported(hardware_concurrency),
            viewport_width,
        }
    }

    /// True when any signal points at a constrained device.
    pub fn is_low_power(&self) -> bool {
        self.reduced_motion
            || self.save_data
            || self
                .device_memory
                .map_or(false, |gb| gb <= LOW_POWER_MEMORY_GB)
            || self
                .hardware_concurrency
                .map_or(false, |cores| cores <= LOW_POWER_CPU_COUNT)
    }

    pub fn preference(&self) -> MotionPreference {
        MotionPreference {
            reduced_motion: self.reduced_motion,
            low_power: self.is_low_power(),
        }
    }

    /// One-time gate for the ambient canvas.
    pub fn should_animate(&self, min_viewport_width: f64) -> bool {
        !self.reduced_motion && !self.is_low_power() && self.viewport_width > min_viewport_width
    }
}

// Zero, negative or NaN means the browser did not report a value.
fn reported(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capable() -> EnvironmentSignals {
        EnvironmentSignals {
            reduced_motion: false,
            save_data: false,
            device_memory: Some(8.0),
            hardware_concurrency: Some(8.0),
            viewport_width: 1920.0,
        }
    }

    #[test]
    fn capable_desktop_animates() {
        assert!(capable().should_animate(768.0));
        assert!(!capable().is_low_power());
    }

    #[test]
    fn reduced_motion_always_blocks() {
        for width in [0.0, 800.0, 4000.0, f64::MAX] {
            let signals = EnvironmentSignals {
                reduced_motion: true,
                viewport_width: width,
                ..capable()
            };
            assert!(!signals.should_animate(768.0));
        }
    }

    #[test]
    fn constrained_devices_are_low_power() {
        let cases = [
            EnvironmentSignals { save_data: true, ..capable() },
            EnvironmentSignals { device_memory: Some(4.0), ..capable() },
            EnvironmentSignals { hardware_concurrency: Some(2.0), ..capable() },
        ];
        for signals in cases {
            assert!(signals.is_low_power(), "{:?}", signals);
            assert!(!signals.should_animate(768.0));
        }
    }

    #[test]
    fn unreported_values_do_not_count() {
        let signals = EnvironmentSignals {
            device_memory: None,
            hardware_concurrency: None,
            ..capable()
        };
        assert!(!signals.is_low_power());
        assert_eq!(reported(Some(0.0)), None);
        assert_eq!(reported(Some(f64::NAN)), None);
    }

    #[test]
    fn width_threshold_is_strict() {
        let signals = EnvironmentSignals { viewport_width: 860.0, ..capable() };
        assert!(!signals.should_animate(860.0));
        assert!(signals.should_animate(768.0));
    }

    #[test]
    fn preference_mirrors_signals() {
        let pref = EnvironmentSignals { save_data: true, ..capable() }.preference();
        assert!(pref.low_power);
        assert!(!pref.reduced_motion);
        assert!(pref.prefers_instant_scroll());
        assert!(!capable().preference().prefers_instant_scroll());
    }
}
