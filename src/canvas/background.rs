//! Ambient background particles.
//!
//! Two motion policies share the canvas:
//!
//! * **Orbital** – a handful of large, soft glow blobs, each circling its own
//!   anchor on an ellipse.
//! * **Constellation** – small points drifting in the unit square, bouncing
//!   off the edges, with a faint line between any two points that are close
//!   on screen.
//!
//! Positions are stored normalized (`0.0..=1.0`) so resizing the viewport
//! never has to touch particle state.

use std::f64::consts::TAU;

use rand::Rng;

use super::viewport::Viewport;
use super::Surface;
use crate::config::{AmbientConfig, Variant};
use crate::constants::*;

fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[String]) -> String {
    if palette.is_empty() {
        return String::from("rgba(255,255,255,0.3)");
    }
    palette[rng.gen_range(0..palette.len())].clone()
}

// ---------------------------------------------------------------------------
// Orbital policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Orb {
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub radius: f64,
    /// Radians per rendered frame.
    pub speed: f64,
    pub angle: f64,
    pub color: String,
}

impl Orb {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, palette: &[String]) -> Orb {
        Orb {
            anchor_x: rng.gen::<f64>(),
            anchor_y: rng.gen::<f64>(),
            radius: ORBITAL_RADIUS_MIN + rng.gen::<f64>() * ORBITAL_RADIUS_SPAN,
            speed: ORBITAL_SPEED_MIN + rng.gen::<f64>() * ORBITAL_SPEED_SPAN,
            angle: rng.gen::<f64>() * TAU,
            color: pick_color(rng, palette),
        }
    }

    pub fn update(&mut self) {
        self.angle = (self.angle + self.speed).rem_euclid(TAU);
    }

    pub fn position(&self, viewport: &Viewport) -> (f64, f64) {
        (
            self.anchor_x * viewport.width + self.angle.cos() * ORBITAL_SWING_X,
            self.anchor_y * viewport.height + self.angle.sin() * ORBITAL_SWING_Y,
        )
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        let (x, y) = self.position(viewport);
        surface.fill_glow(x, y, self.radius, &self.color);
    }
}

// ---------------------------------------------------------------------------
// Constellation policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DriftPoint {
    pub x: f64,
    pub y: f64,
    /// Normalized units per update.
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: String,
}

impl DriftPoint {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, palette: &[String]) -> DriftPoint {
        DriftPoint {
            x: rng.gen::<f64>(),
            y: rng.gen::<f64>(),
            vx: rng.gen_range(-CONSTELLATION_MAX_SPEED..=CONSTELLATION_MAX_SPEED),
            vy: rng.gen_range(-CONSTELLATION_MAX_SPEED..=CONSTELLATION_MAX_SPEED),
            radius: CONSTELLATION_RADIUS_MIN + rng.gen::<f64>() * CONSTELLATION_RADIUS_SPAN,
            color: pick_color(rng, palette),
        }
    }

    /// Advance one step.  A coordinate that leaves `[0, 1]` is put back on the
    /// edge and its velocity component flips in the same update.
    pub fn update(&mut self) {
        bounce_axis(&mut self.x, &mut self.vx);
        bounce_axis(&mut self.y, &mut self.vy);
    }

    pub fn screen_position(&self, viewport: &Viewport) -> (f64, f64) {
        (self.x * viewport.width, self.y * viewport.height)
    }
}

fn bounce_axis(pos: &mut f64, vel: &mut f64) {
    *pos += *vel;
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
    } else if *pos > 1.0 {
        *pos = 1.0;
        *vel = -vel.abs();
    }
}

/// Opacity of the edge between two points `distance` pixels apart: linear
/// falloff from `max_opacity` at 0 to nothing at `threshold`.
pub fn link_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
    if threshold <= 0.0 || !(distance < threshold) {
        return None;
    }
    Some(max_opacity * (1.0 - distance / threshold))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// Every pair closer than `threshold` on screen.  O(N²).
pub fn links(points: &[DriftPoint], viewport: &Viewport, threshold: f64, max_opacity: f64) -> Vec<Link> {
    let mut out = Vec::new();
    for (a, pa) in points.iter().enumerate() {
        let (ax, ay) = pa.screen_position(viewport);
        for (offset, pb) in points[a + 1..].iter().enumerate() {
            let (bx, by) = pb.screen_position(viewport);
            let distance = (ax - bx).hypot(ay - by);
            if let Some(opacity) = link_opacity(distance, threshold, max_opacity) {
                out.push(Link { a, b: a + 1 + offset, opacity });
            }
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    pub points: Vec<DriftPoint>,
    pub link_distance: f64,
    pub max_link_opacity: f64,
}

impl Constellation {
    fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        let [r, g, b] = CONSTELLATION_LINK_RGB;
        for link in links(&self.points, viewport, self.link_distance, self.max_link_opacity) {
            let color = format!("rgba({},{},{},{:.3})", r, g, b, link.opacity);
            surface.stroke_line(
                self.points[link.a].screen_position(viewport),
                self.points[link.b].screen_position(viewport),
                &color,
                CONSTELLATION_LINK_WIDTH,
            );
        }
        for point in &self.points {
            let (x, y) = point.screen_position(viewport);
            surface.fill_circle(x, y, point.radius, &point.color);
        }
    }
}

// ---------------------------------------------------------------------------
// Field – the whole particle set for one canvas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ParticleField {
    Orbital(Vec<Orb>),
    Constellation(Constellation),
}

impl ParticleField {
    pub fn generate<R: Rng + ?Sized>(config: &AmbientConfig, rng: &mut R) -> ParticleField {
        match config.variant {
            Variant::Orbital => ParticleField::Orbital(
                (0..config.particle_count)
                    .map(|_| Orb::random(rng, &config.palette))
                    .collect(),
            ),
            Variant::Constellation => ParticleField::Constellation(Constellation {
                points: (0..config.particle_count)
                    .map(|_| DriftPoint::random(rng, &config.palette))
                    .collect(),
                link_distance: config.link_distance,
                max_link_opacity: config.max_link_opacity,
            }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ParticleField::Orbital(orbs) => orbs.len(),
            ParticleField::Constellation(c) => c.points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn update(&mut self) {
        match self {
            ParticleField::Orbital(orbs) => orbs.iter_mut().for_each(Orb::update),
            ParticleField::Constellation(c) => c.points.iter_mut().for_each(DriftPoint::update),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        match self {
            ParticleField::Orbital(orbs) => {
                for orb in orbs {
                    orb.draw(surface, viewport);
                }
            }
            ParticleField::Constellation(c) => c.draw(surface, viewport),
        }
    }
}
