//! Sprite derivation: a read-only view of particle state for drawing.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use motes_core::Rgba;

use crate::map_range;
use crate::particle::Particle;

/// Base stroke weight of targeted particles.
pub const ACTIVE_BASE_WEIGHT: f32 = 8.4;

/// Base stroke weight of idle particles.
pub const IDLE_BASE_WEIGHT: f32 = 5.6;

const RADIAL_FALLOFF: f32 = 400.0;
const RADIAL_NEAR_SCALE: f32 = 3.5;
const RADIAL_FAR_SCALE: f32 = 0.8;

const PULSE_RATE: f32 = 0.01;
const PULSE_SPREAD: f32 = 0.005;
const PULSE_LOW: f32 = 0.8;
const PULSE_HIGH: f32 = 2.5;

/// How one particle should be drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    /// Stroke weight (diameter) in display units.
    pub weight: f32,
    pub color: Rgba,
    pub targeted: bool,
}

/// Derive the sprite for `particle` in zone `zone_index` whose formation
/// center is `center`.
///
/// Targeted particles grow toward the formation center, giving the glyph a
/// denser core. Idle particles pulse, phased by their own x position so
/// neighbors do not pulse together.
pub fn sprite(particle: &Particle, zone_index: usize, center: Vec2, frame: u64) -> Sprite {
    let position = particle.position();
    let weight = if particle.is_targeted() {
        let scale = map_range(
            position.distance(center),
            0.0,
            RADIAL_FALLOFF,
            RADIAL_NEAR_SCALE,
            RADIAL_FAR_SCALE,
        )
        .clamp(RADIAL_FAR_SCALE, RADIAL_NEAR_SCALE);
        ACTIVE_BASE_WEIGHT * scale
    } else {
        let phase =
            frame as f32 * PULSE_RATE + zone_index as f32 * FRAC_PI_2 + position.x * PULSE_SPREAD;
        map_range(
            phase.sin(),
            -1.0,
            1.0,
            IDLE_BASE_WEIGHT * PULSE_LOW,
            IDLE_BASE_WEIGHT * PULSE_HIGH,
        )
    };

    Sprite {
        position,
        weight,
        color: particle.color(),
        targeted: particle.is_targeted(),
    }
}
