//! Glyph rasterization: turn a character into a sparse cloud of target points.
//!
//! The glyph is painted at half the requested size into a fresh 1000x1000
//! raster and sampled on a regular grid; every lit sample is mapped back to
//! screen space with twice the offset from the raster center. The half-size
//! paint and the doubling on the way out belong together: changing one
//! without the other misaligns the glyph.

use std::iter::FusedIterator;

use glam::Vec2;
use image::RgbaImage;
use motes_fonts::Face;

/// Width and height of the working raster, in pixels.
pub const RASTER_SIZE: u32 = 1000;

/// Paint scale applied to the requested glyph size.
pub const RASTER_SCALE: f32 = 0.5;

/// Screen-space expansion applied to raster offsets.
pub const COORD_EXPANSION: f32 = 2.0;

/// A sample is lit when its red channel exceeds this level.
pub const LIT_THRESHOLD: u8 = 127;

/// Glyph size used for the clock digits.
pub const DIGIT_SIZE: f32 = 850.0;

/// Sampling stride used for the clock digits, in raster pixels.
pub const DIGIT_STEP: u32 = 9;

/// Rasterize `ch` with `face` and return its lit sample points, anchored on
/// `anchor` in screen space.
///
/// The returned iterator scans lazily, column by column, and owns the raster
/// it scans; every call paints a new one.
pub fn rasterize(face: &Face, ch: char, anchor: Vec2, size: f32, step: u32) -> GlyphPoints {
    let mut raster = RgbaImage::new(RASTER_SIZE, RASTER_SIZE);
    let center = (RASTER_SIZE / 2) as f32;
    face.paint(ch, size * RASTER_SCALE, (center, center), &mut raster);

    GlyphPoints {
        raster,
        anchor,
        step: step.max(1),
        x: 0,
        y: 0,
    }
}

/// Lazy scan over a painted glyph raster.
#[derive(Debug)]
pub struct GlyphPoints {
    raster: RgbaImage,
    anchor: Vec2,
    step: u32,
    x: u32,
    y: u32,
}

impl GlyphPoints {
    fn to_screen(&self, x: u32, y: u32) -> Vec2 {
        let center = (RASTER_SIZE / 2) as f32;
        self.anchor + (Vec2::new(x as f32, y as f32) - center) * COORD_EXPANSION
    }
}

impl Iterator for GlyphPoints {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        let (width, height) = self.raster.dimensions();

        while self.x < width {
            while self.y < height {
                let (x, y) = (self.x, self.y);
                self.y += self.step;
                if self.raster.get_pixel(x, y).0[0] > LIT_THRESHOLD {
                    return Some(self.to_screen(x, y));
                }
            }
            self.y = 0;
            self.x += self.step;
        }
        None
    }
}

impl FusedIterator for GlyphPoints {}
