//! RGBA color with floating point channels.

/// An RGBA color whose channels are kept as `f32` levels in `0.0..=255.0`.
///
/// Channels stay fractional so repeated blending converges smoothly instead of
/// stalling on integer rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32,
            g: g as f32,
            b: b as f32,
            a: 255.0,
        }
    }

    /// Linear interpolation toward `other` by `t` (0.0 = self, 1.0 = other).
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Euclidean distance between two colors in channel space.
    pub fn distance(self, other: Self) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        let da = self.a - other.a;
        (dr * dr + dg * dg + db * db + da * da).sqrt()
    }

    /// Round to 8-bit RGB, dropping alpha.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let q = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::rgb(0, 0, 0);
        let b = Rgba::rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5).to_rgb8(), (100, 50, 25));
        // Out of range blend factors are clamped
        assert_eq!(a.lerp(b, 2.0), b);
    }

    #[test]
    fn test_to_rgb8_rounds() {
        let c = Rgba {
            r: 10.6,
            g: 300.0,
            b: -4.0,
            a: 255.0,
        };
        assert_eq!(c.to_rgb8(), (11, 255, 0));
    }
}
