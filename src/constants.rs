// Preset values for the two ambient background variants. `config.rs` turns
// these into `AmbientConfig` values; page-level overrides start from here.

// Shared
pub const RESIZE_DEBOUNCE_MS: u32 = 250;
pub const LOW_POWER_MEMORY_GB: f64 = 4.0;
pub const LOW_POWER_CPU_COUNT: f64 = 4.0;
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Orbital glow orbs
pub const ORBITAL_MIN_VIEWPORT_WIDTH: f64 = 768.0;
pub const ORBITAL_ORB_COUNT: usize = 6;
pub const ORBITAL_FRAME_INTERVAL_MS: f64 = 40.0;
pub const ORBITAL_MAX_PIXEL_RATIO: f64 = 1.2;
pub const ORBITAL_SCROLL_PAUSE_MS: f64 = 180.0;
pub const ORBITAL_RADIUS_MIN: f64 = 70.0;
pub const ORBITAL_RADIUS_SPAN: f64 = 100.0;
pub const ORBITAL_SPEED_MIN: f64 = 0.00025;
pub const ORBITAL_SPEED_SPAN: f64 = 0.0006;
pub const ORBITAL_SWING_X: f64 = 110.0;
pub const ORBITAL_SWING_Y: f64 = 80.0;
pub const ORBITAL_PALETTE: [&str; 4] = [
    "rgba(42,167,168,0.35)",
    "rgba(255,155,134,0.3)",
    "rgba(243,192,107,0.28)",
    "rgba(31,111,120,0.26)",
];
pub const ORB_FADE_COLOR: &str = "rgba(255,255,255,0)";

// Drifting, linked points
pub const CONSTELLATION_MIN_VIEWPORT_WIDTH: f64 = 860.0;
pub const CONSTELLATION_POINT_COUNT: usize = 42;
pub const CONSTELLATION_FRAME_INTERVAL_MS: f64 = 33.0;
pub const CONSTELLATION_MAX_PIXEL_RATIO: f64 = 1.5;
pub const CONSTELLATION_MAX_SPEED: f64 = 0.00035;
pub const CONSTELLATION_RADIUS_MIN: f64 = 1.2;
pub const CONSTELLATION_RADIUS_SPAN: f64 = 1.4;
pub const CONSTELLATION_LINK_DISTANCE: f64 = 150.0;
pub const CONSTELLATION_MAX_LINK_OPACITY: f64 = 0.22;
pub const CONSTELLATION_LINK_WIDTH: f64 = 1.0;
pub const CONSTELLATION_LINK_RGB: [u8; 3] = [42, 167, 168];
pub const CONSTELLATION_PALETTE: [&str; 3] = [
    "rgba(42,167,168,0.75)",
    "rgba(255,155,134,0.7)",
    "rgba(243,192,107,0.7)",
];

// Page interaction layer
pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const REVEAL_ROOT_MARGIN: &str = "60px";
pub const SUBMIT_PENDING_LABEL: &str = "Sending...";
