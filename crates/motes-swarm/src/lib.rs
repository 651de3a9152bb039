//! Particle formation engine for the motes clock.
//!
//! Each of the four digit zones owns a pool of particles. Every frame the
//! zone's digit is rasterized into target points ([`raster`]), the points are
//! handed to particles by index ([`assign`]), and every particle steers and
//! integrates one step ([`particle`]). Clock edges inject impulses into all
//! zones ([`disturbance`]), and [`render`] turns particle state into sprites.
//! [`SwarmWorld`] owns all of it and is driven once per frame.

pub mod assign;
pub mod disturbance;
pub mod particle;
pub mod raster;
pub mod render;
mod world;
mod zone;

pub use disturbance::{ClockEdges, Edges, Impulse};
pub use particle::{Bounds, Particle};
pub use render::Sprite;
pub use world::{FrameReport, SwarmWorld};
pub use zone::Zone;

/// Re-map `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]` without
/// clamping.
pub(crate) fn map_range(value: f32, from_lo: f32, from_hi: f32, to_lo: f32, to_hi: f32) -> f32 {
    to_lo + (value - from_lo) / (from_hi - from_lo) * (to_hi - to_lo)
}

/// Uniformly distributed unit vector.
pub(crate) fn random_unit(rng: &mut impl rand::Rng) -> glam::Vec2 {
    glam::Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU))
}
