//! Ambient background configuration.
//!
//! Every page ships one of two presets (`Variant`).  A page may fine-tune the
//! preset through a JSON object in the canvas' `data-ambient-config`
//! attribute, e.g.
//!
//! ```html
//! <canvas id="orbitalCanvas" data-variant="constellation"
//!         data-ambient-config='{"particleCount": 30, "linkDistance": 120}'>
//! ```
//!
//! Only the named fields change; everything else keeps the preset value.

use serde::Deserialize;

use crate::constants::*;

/// Upper bound for page-supplied particle counts.  Linking is O(N²) per
/// frame so an unbounded value could stall the UI thread.
pub const MAX_PARTICLE_COUNT: usize = 160;

/// Which motion policy a page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Soft glow blobs circling around fixed anchors.
    Orbital,
    /// Points drifting inside the viewport, linked when close.
    Constellation,
}

impl Variant {
    /// Parse the value of a `data-variant` attribute.  Unknown values yield
    /// `None` so the caller can keep its default.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "orbital" | "orbs" => Some(Variant::Orbital),
            "constellation" | "links" => Some(Variant::Constellation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmbientConfig {
    pub variant: Variant,
    pub particle_count: usize,
    /// Minimum time between two rendered frames.
    pub frame_interval_ms: f64,
    /// The animation only starts on viewports strictly wider than this.
    pub min_viewport_width: f64,
    pub max_pixel_ratio: f64,
    pub pause_on_scroll: bool,
    pub scroll_pause_ms: f64,
    pub resize_debounce_ms: u32,
    pub link_distance: f64,
    pub max_link_opacity: f64,
    pub palette: Vec<String>,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self::preset(Variant::Orbital)
    }
}

impl AmbientConfig {
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Orbital => Self {
                variant,
                particle_count: ORBITAL_ORB_COUNT,
                frame_interval_ms: ORBITAL_FRAME_INTERVAL_MS,
                min_viewport_width: ORBITAL_MIN_VIEWPORT_WIDTH,
                max_pixel_ratio: ORBITAL_MAX_PIXEL_RATIO,
                pause_on_scroll: true,
                scroll_pause_ms: ORBITAL_SCROLL_PAUSE_MS,
                resize_debounce_ms: RESIZE_DEBOUNCE_MS,
                link_distance: 0.0,
                max_link_opacity: 0.0,
                palette: ORBITAL_PALETTE.iter().map(|c| c.to_string()).collect(),
            },
            Variant::Constellation => Self {
                variant,
                particle_count: CONSTELLATION_POINT_COUNT,
                frame_interval_ms: CONSTELLATION_FRAME_INTERVAL_MS,
                min_viewport_width: CONSTELLATION_MIN_VIEWPORT_WIDTH,
                max_pixel_ratio: CONSTELLATION_MAX_PIXEL_RATIO,
                pause_on_scroll: false,
                scroll_pause_ms: 0.0,
                resize_debounce_ms: RESIZE_DEBOUNCE_MS,
                link_distance: CONSTELLATION_LINK_DISTANCE,
                max_link_opacity: CONSTELLATION_MAX_LINK_OPACITY,
                palette: CONSTELLATION_PALETTE.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    /// Start from the `variant` preset and apply the overrides found in
    /// `json`.  Returns an error string when the JSON is malformed so the
    /// caller can log it and fall back to the plain preset.
    pub fn from_overrides_json(variant: Variant, json: &str) -> Result<Self, String> {
        let overrides: AmbientOverrides =
            serde_json::from_str(json).map_err(|e| format!("Invalid ambient config: {}", e))?;
        let mut config = Self::preset(variant);
        config.apply(overrides);
        Ok(config)
    }

    fn apply(&mut self, overrides: AmbientOverrides) {
        if let Some(count) = overrides.particle_count {
            self.particle_count = count.min(MAX_PARTICLE_COUNT);
        }
        if let Some(ms) = overrides.frame_interval_ms.filter(|v| v.is_finite() && *v >= 0.0) {
            self.frame_interval_ms = ms;
        }
        if let Some(width) = overrides.min_viewport_width.filter(|v| v.is_finite()) {
            self.min_viewport_width = width;
        }
        if let Some(ratio) = overrides.max_pixel_ratio.filter(|v| v.is_finite() && *v > 0.0) {
            self.max_pixel_ratio = ratio;
        }
        if let Some(pause) = overrides.pause_on_scroll {
            self.pause_on_scroll = pause;
        }
        if let Some(ms) = overrides.scroll_pause_ms.filter(|v| v.is_finite() && *v >= 0.0) {
            self.scroll_pause_ms = ms;
        }
        if let Some(ms) = overrides.resize_debounce_ms {
            self.resize_debounce_ms = ms;
        }
        if let Some(distance) = overrides.link_distance.filter(|v| v.is_finite() && *v >= 0.0) {
            self.link_distance = distance;
        }
        if let Some(opacity) = overrides.max_link_opacity.filter(|v| v.is_finite()) {
            self.max_link_opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(palette) = overrides.palette.filter(|p| !p.is_empty()) {
            self.palette = palette;
        }
    }
}

/// Page-supplied tweaks; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AmbientOverrides {
    particle_count: Option<usize>,
    frame_interval_ms: Option<f64>,
    min_viewport_width: Option<f64>,
    max_pixel_ratio: Option<f64>,
    pause_on_scroll: Option<bool>,
    scroll_pause_ms: Option<f64>,
    resize_debounce_ms: Option<u32>,
    link_distance: Option<f64>,
    max_link_opacity: Option<f64>,
    palette: Option<Vec<String>>,
}
