//! A digit zone: one quarter of the display and the particles living in it.

use glam::Vec2;
use motes_core::{Palette, Rgba, ZONE_COUNT};
use motes_fonts::Face;
use noise::Perlin;
use rand::Rng;

use crate::assign::assign_targets;
use crate::disturbance::Impulse;
use crate::particle::{Bounds, Particle, Surroundings};
use crate::raster::{self, DIGIT_SIZE, DIGIT_STEP};
use crate::render::{self, Sprite};

/// The formation center sits this far above the vertical middle.
const FORMATION_LIFT: f32 = 140.0;

/// One digit's region and particle pool.
#[derive(Debug, Clone)]
pub struct Zone {
    index: usize,
    bounds: Bounds,
    center: Vec2,
    particles: Vec<Particle>,
    /// Digit the current points were rasterized from.
    digit: Option<char>,
    points: Vec<Vec2>,
    /// Number of times the target points were rebuilt.
    rasterizations: u64,
}

impl Zone {
    /// Create zone `index` of a `display`-sized surface with `count`
    /// particles scattered randomly across its band.
    pub fn new(index: usize, display: Vec2, count: usize, color: Rgba, rng: &mut impl Rng) -> Self {
        let width = display.x / ZONE_COUNT as f32;
        let min_x = index as f32 * width;
        let bounds = Bounds {
            min_x,
            max_x: min_x + width,
            min_y: 0.0,
            max_y: display.y,
        };
        let center = Vec2::new(min_x + width / 2.0, display.y / 2.0 - FORMATION_LIFT);

        let particles = (0..count)
            .map(|_| {
                let position = Vec2::new(
                    rng.gen_range(bounds.min_x..bounds.max_x),
                    rng.gen_range(0.0..display.y),
                );
                Particle::new(position, color)
            })
            .collect();

        Self {
            index,
            bounds,
            center,
            particles,
            digit: None,
            points: Vec::new(),
            rasterizations: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Formation center: the glyph anchor and the idle breathing anchor.
    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn digit(&self) -> Option<char> {
        self.digit
    }

    /// Target points for the current digit.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn rasterizations(&self) -> u64 {
        self.rasterizations
    }

    /// Drop the cached glyph so the next retarget rasterizes again.
    pub fn invalidate(&mut self) {
        self.digit = None;
    }

    /// Point the zone at `digit` and reassign targets.
    ///
    /// Rasterization is a pure function of face and digit, so the points are
    /// rebuilt only when the digit changes or the cache was invalidated.
    /// Without a face every particle goes idle. Returns whether the points
    /// were rebuilt.
    pub fn retarget(&mut self, face: Option<&Face>, digit: char) -> bool {
        let rebuilt = match face {
            Some(face) if self.digit != Some(digit) => {
                self.points =
                    raster::rasterize(face, digit, self.center, DIGIT_SIZE, DIGIT_STEP).collect();
                self.digit = Some(digit);
                self.rasterizations += 1;
                if self.points.is_empty() {
                    log::debug!("zone {}: '{digit}' has no lit samples", self.index);
                }
                true
            }
            Some(_) => false,
            None => {
                self.points.clear();
                self.digit = None;
                false
            }
        };

        assign_targets(&mut self.particles, &self.points);
        rebuilt
    }

    /// Push every particle with a freshly drawn `impulse`.
    pub fn apply_impulse(&mut self, impulse: Impulse, rng: &mut impl Rng) {
        for particle in &mut self.particles {
            particle.apply_force(impulse.sample(rng));
        }
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self, frame: u64, noise: &Perlin, palette: &Palette, rng: &mut impl Rng) {
        let env = Surroundings {
            frame,
            zone_index: self.index,
            center: self.center,
            noise,
        };
        for particle in &mut self.particles {
            particle.step(&env, &self.bounds, palette, rng);
        }
    }

    /// Sprites for every particle, in pool order.
    pub fn sprites(&self, frame: u64) -> impl Iterator<Item = Sprite> + '_ {
        self.particles
            .iter()
            .map(move |p| render::sprite(p, self.index, self.center, frame))
    }
}
