//! Particle steering and integration.
//!
//! A particle is either targeted (it holds a glyph point and "arrives" at it)
//! or idle (it drifts along a noise field while breathing toward its zone's
//! center). Both modes get a little random jitter every frame. The mode is
//! whatever the assigner decided this frame; only the color lags behind.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use motes_core::{Palette, Rgba};
use noise::{NoiseFn, Perlin};
use rand::Rng;

use crate::{map_range, random_unit};

/// Speed limit applied after every force accumulation.
pub const MAX_SPEED: f32 = 22.0;

/// Steering force limit for the arrive behavior.
pub const MAX_FORCE: f32 = 2.0;

/// Distance inside which arriving particles start to brake.
pub const ARRIVE_RADIUS: f32 = 120.0;

/// Velocity multiplier applied once per frame.
pub const DAMPING: f32 = 0.92;

/// Magnitude of the per-frame random jitter.
pub const JITTER: f32 = 0.2;

/// Magnitude of the idle wander force.
pub const WANDER: f32 = 0.1;

/// Fraction of the remaining color distance covered per frame.
pub const COLOR_BLEND: f32 = 0.08;

const NOISE_SPACE_SCALE: f64 = 0.003;
const NOISE_TIME_SCALE: f64 = 0.005;

const BREATH_RATE: f32 = 0.008;
const BREATH_MIN: f32 = 0.01;
const BREATH_MAX: f32 = 0.08;

/// Rectangle a particle is kept inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Zone-wide inputs to a particle's steering for one frame.
#[derive(Clone, Copy)]
pub struct Surroundings<'a> {
    pub frame: u64,
    pub zone_index: usize,
    /// Formation center of the zone, the breathing anchor.
    pub center: Vec2,
    pub noise: &'a Perlin,
}

/// Strength of the idle breathing pull for a zone at a given frame.
///
/// Each zone is a quarter turn out of phase with its neighbor.
pub fn breath_strength(frame: u64, zone_index: usize) -> f32 {
    let phase = frame as f32 * BREATH_RATE + zone_index as f32 * FRAC_PI_2;
    map_range(phase.sin(), -1.0, 1.0, BREATH_MIN, BREATH_MAX)
}

/// `v` rescaled to `length`; the zero vector stays zero.
fn with_length(v: Vec2, length: f32) -> Vec2 {
    v.normalize_or_zero() * length
}

/// A single swarm particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    target: Option<Vec2>,
    color: Rgba,
}

impl Particle {
    /// Particle at rest at `position`.
    pub fn new(position: Vec2, color: Rgba) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            target: None,
            color,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Forces accumulated since the last integration.
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    pub fn target(&self) -> Option<Vec2> {
        self.target
    }

    pub fn is_targeted(&self) -> bool {
        self.target.is_some()
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn set_target(&mut self, target: Option<Vec2>) {
        self.target = target;
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Steering force toward `target` that brakes linearly inside
    /// [`ARRIVE_RADIUS`].
    pub fn arrive(&self, target: Vec2) -> Vec2 {
        let offset = target - self.position;
        let distance = offset.length();
        let speed = if distance < ARRIVE_RADIUS {
            map_range(distance, 0.0, ARRIVE_RADIUS, 0.0, MAX_SPEED)
        } else {
            MAX_SPEED
        };
        (with_length(offset, speed) - self.velocity).clamp_length_max(MAX_FORCE)
    }

    /// Accumulate this frame's steering forces.
    pub fn steer(&mut self, env: &Surroundings<'_>, rng: &mut impl Rng) {
        match self.target {
            Some(target) => self.apply_force(self.arrive(target)),
            None => {
                self.apply_force(self.wander(env));
                let pull = with_length(
                    env.center - self.position,
                    breath_strength(env.frame, env.zone_index),
                );
                self.apply_force(pull);
            }
        }
        self.apply_force(random_unit(rng) * JITTER);
    }

    /// Wander force whose heading follows a smooth noise field over position
    /// and time.
    fn wander(&self, env: &Surroundings<'_>) -> Vec2 {
        let sample = env.noise.get([
            self.position.x as f64 * NOISE_SPACE_SCALE,
            self.position.y as f64 * NOISE_SPACE_SCALE,
            env.frame as f64 * NOISE_TIME_SCALE,
        ]);
        let n = ((sample + 1.0) / 2.0).clamp(0.0, 1.0) as f32;
        Vec2::from_angle(TAU * n) * WANDER
    }

    /// Integrate accumulated forces, then keep the particle inside `bounds`.
    ///
    /// A particle that leaves the bounds has the offending velocity component
    /// turned back inward and is placed on the edge it crossed. This is
    /// stricter than flipping the sign of the velocity: a plain flip lets a
    /// particle overshoot for a frame, and flips a particle that is already
    /// heading back in right back out.
    pub fn integrate(&mut self, bounds: &Bounds) {
        self.velocity = (self.velocity + self.acceleration).clamp_length_max(MAX_SPEED);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
        self.velocity *= DAMPING;

        if self.position.x < bounds.min_x {
            self.velocity.x = self.velocity.x.abs();
            self.position.x = bounds.min_x;
        } else if self.position.x > bounds.max_x {
            self.velocity.x = -self.velocity.x.abs();
            self.position.x = bounds.max_x;
        }
        if self.position.y < bounds.min_y {
            self.velocity.y = self.velocity.y.abs();
            self.position.y = bounds.min_y;
        } else if self.position.y > bounds.max_y {
            self.velocity.y = -self.velocity.y.abs();
            self.position.y = bounds.max_y;
        }
    }

    /// Move the color a fixed fraction toward the reference color of the
    /// current mode.
    pub fn blend_color(&mut self, palette: &Palette) {
        let reference = if self.is_targeted() {
            palette.active
        } else {
            palette.idle
        };
        self.color = self.color.lerp(reference, COLOR_BLEND);
    }

    /// One full frame: steer, integrate, blend.
    pub fn step(
        &mut self,
        env: &Surroundings<'_>,
        bounds: &Bounds,
        palette: &Palette,
        rng: &mut impl Rng,
    ) {
        self.steer(env, rng);
        self.integrate(bounds);
        self.blend_color(palette);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: Bounds = Bounds {
        min_x: 0.0,
        max_x: 480.0,
        min_y: 0.0,
        max_y: 1080.0,
    };

    fn palette() -> Palette {
        Palette {
            active: Rgba::rgb(0x89, 0xC9, 0x25),
            idle: Rgba::rgb(0x2A, 0x33, 0x20),
        }
    }

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), palette().idle)
    }

    #[test]
    fn test_arrive_at_target_is_still() {
        let p = particle_at(100.0, 100.0);
        assert_eq!(p.arrive(Vec2::new(100.0, 100.0)), Vec2::ZERO);
    }

    #[test]
    fn test_arrive_force_is_limited() {
        let mut p = particle_at(0.0, 0.0);
        p.velocity = Vec2::new(-20.0, 5.0);
        let force = p.arrive(Vec2::new(400.0, 300.0));
        assert!(force.length() <= MAX_FORCE + 1e-4);
        assert!(force.x > 0.0);
    }

    #[test]
    fn test_arrive_brakes_inside_radius() {
        let mut p = particle_at(0.0, 0.0);
        // Moving toward the target at full speed while 60 units away:
        // desired speed is half the max, so the force opposes the motion
        p.velocity = Vec2::new(MAX_SPEED, 0.0);
        let force = p.arrive(Vec2::new(60.0, 0.0));
        assert!(force.x < 0.0);

        // Far away at full speed: nothing to correct
        let far = p.arrive(Vec2::new(1000.0, 0.0));
        assert!(far.length() < 1e-4);
    }

    #[test]
    fn test_targeted_particle_converges() {
        let mut rng = StdRng::seed_from_u64(1);
        let noise = Perlin::new(1);
        let env = Surroundings {
            frame: 0,
            zone_index: 0,
            center: Vec2::new(240.0, 400.0),
            noise: &noise,
        };
        let target = Vec2::new(300.0, 600.0);
        let mut p = particle_at(50.0, 50.0);
        p.set_target(Some(target));

        for _ in 0..600 {
            p.step(&env, &BOUNDS, &palette(), &mut rng);
        }
        // Jitter keeps it from settling exactly
        assert!(p.position().distance(target) < 10.0);
    }

    #[test]
    fn test_idle_steering_accumulates_forces() {
        let mut rng = StdRng::seed_from_u64(2);
        let noise = Perlin::new(2);
        let env = Surroundings {
            frame: 10,
            zone_index: 1,
            center: Vec2::new(240.0, 400.0),
            noise: &noise,
        };
        let mut p = particle_at(10.0, 10.0);
        p.steer(&env, &mut rng);

        let acc = p.acceleration().length();
        let ceiling = WANDER + BREATH_MAX + JITTER;
        assert!(acc > 0.0 && acc <= ceiling + 1e-4);
    }

    #[test]
    fn test_velocity_never_exceeds_max_speed() {
        let mut p = particle_at(240.0, 500.0);
        p.apply_force(Vec2::new(550.0, -300.0));
        p.integrate(&BOUNDS);
        assert!(p.velocity().length() <= MAX_SPEED + 1e-3);
    }

    #[test]
    fn test_integration_order() {
        let mut p = particle_at(100.0, 100.0);
        p.velocity = Vec2::new(1.0, 0.0);
        p.apply_force(Vec2::new(1.0, 2.0));
        p.integrate(&BOUNDS);

        assert_eq!(p.position(), Vec2::new(102.0, 102.0));
        assert_eq!(p.velocity(), Vec2::new(2.0, 2.0) * DAMPING);
        assert_eq!(p.acceleration(), Vec2::ZERO);
    }

    #[test]
    fn test_reflects_off_band_edges() {
        let mut p = particle_at(475.0, 500.0);
        p.velocity = Vec2::new(10.0, 0.0);
        p.integrate(&BOUNDS);
        assert_eq!(p.position().x, BOUNDS.max_x);
        assert!(p.velocity().x < 0.0);

        let mut p = particle_at(3.0, 2.0);
        p.velocity = Vec2::new(-10.0, -10.0);
        p.integrate(&BOUNDS);
        assert!(BOUNDS.contains(p.position()));
        assert!(p.velocity().x > 0.0 && p.velocity().y > 0.0);
    }

    #[test]
    fn test_outside_particle_moving_inward_keeps_heading() {
        // Already headed back in: reflection must not turn it around again
        let mut p = particle_at(490.0, 500.0);
        p.velocity = Vec2::new(-2.0, 0.0);
        p.integrate(&BOUNDS);
        assert!(p.velocity().x < 0.0);
        assert!(BOUNDS.contains(p.position()));
    }

    #[test]
    fn test_color_approaches_idle_monotonically() {
        let pal = palette();
        let mut p = Particle::new(Vec2::ZERO, pal.active);
        let mut last = p.color().distance(pal.idle);

        for _ in 0..200 {
            p.blend_color(&pal);
            let c = p.color();
            let d = c.distance(pal.idle);
            assert!(d <= last);
            // Never passes the reference on any channel
            assert!(c.r >= pal.idle.r && c.g >= pal.idle.g && c.b >= pal.idle.b);
            last = d;
        }
        assert!(last < 0.1);
    }

    #[test]
    fn test_color_approaches_active_monotonically() {
        let pal = palette();
        let mut p = Particle::new(Vec2::ZERO, pal.idle);
        p.set_target(Some(Vec2::ONE));
        let mut last = p.color().distance(pal.active);

        for _ in 0..200 {
            p.blend_color(&pal);
            let c = p.color();
            let d = c.distance(pal.active);
            assert!(d <= last);
            assert!(c.r <= pal.active.r && c.g <= pal.active.g && c.b <= pal.active.b);
            last = d;
        }
    }

    #[test]
    fn test_breath_strength_range_and_phase() {
        for frame in (0..2000).step_by(7) {
            let s = breath_strength(frame, 0);
            assert!((BREATH_MIN - 1e-6..=BREATH_MAX + 1e-6).contains(&s));
        }
        // Zones start out of phase
        assert_ne!(breath_strength(0, 0), breath_strength(0, 1));
    }
}
