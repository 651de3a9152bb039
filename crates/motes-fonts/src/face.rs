//! Paintable glyph faces.

use std::fmt;
use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use image::RgbaImage;

use crate::block::BlockFace;
use crate::error::{FontError, Result};

/// An outline font loaded from a TrueType/OpenType file.
#[derive(Clone)]
pub struct OutlineFace {
    name: String,
    font: FontArc,
}

impl fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFace")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl OutlineFace {
    /// Read and parse a font file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_bytes(name, bytes).map_err(|_| FontError::Invalid {
            path: path.to_path_buf(),
        })
    }

    /// Parse font data already in memory.
    pub fn from_bytes(name: String, bytes: Vec<u8>) -> std::result::Result<Self, ab_glyph::InvalidFont> {
        let font = FontArc::try_from_vec(bytes)?;
        Ok(Self { name, font })
    }

    /// Paint `ch` with its line box centered on `center`.
    ///
    /// Coverage is accumulated onto the existing pixels as white-on-black.
    pub fn paint(&self, ch: char, px_size: f32, center: (f32, f32), canvas: &mut RgbaImage) {
        let scale = PxScale::from(px_size);
        let scaled = self.font.as_scaled(scale);
        let id = self.font.glyph_id(ch);

        let x = center.0 - scaled.h_advance(id) / 2.0;
        // descent is negative: this puts the middle of the line box on center.1
        let baseline = center.1 + (scaled.ascent() + scaled.descent()) / 2.0;
        let glyph = id.with_scale_and_position(scale, point(x, baseline));

        let Some(outlined) = self.font.outline_glyph(glyph) else {
            return;
        };
        let bounds = outlined.px_bounds();
        let (w, h) = canvas.dimensions();

        outlined.draw(|gx, gy, coverage| {
            let px = bounds.min.x as i64 + gx as i64;
            let py = bounds.min.y as i64 + gy as i64;
            if px < 0 || py < 0 || px >= w as i64 || py >= h as i64 {
                return;
            }
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            let old = pixel.0[0] as f32;
            let level = (old + (255.0 - old) * coverage.clamp(0.0, 1.0)).round() as u8;
            pixel.0 = [level, level, level, 255];
        });
    }
}

/// Anything that can paint a glyph into a raster.
#[derive(Debug, Clone)]
pub enum Face {
    Outline(OutlineFace),
    Block(BlockFace),
}

impl Face {
    /// Paint `ch` in white, centered on `center`, sized to `px_size` pixels.
    pub fn paint(&self, ch: char, px_size: f32, center: (f32, f32), canvas: &mut RgbaImage) {
        match self {
            Face::Outline(face) => face.paint(ch, px_size, center, canvas),
            Face::Block(face) => face.paint(ch, px_size, center, canvas),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Face::Outline(face) => &face.name,
            Face::Block(_) => "built-in block",
        }
    }

    /// Whether this is the built-in fallback face.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Face::Block(_))
    }
}
