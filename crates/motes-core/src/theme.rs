//! Particle color palettes.

use serde::Deserialize;

use crate::color::Rgba;

/// Reference colors a particle blends toward, per mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Color of particles holding a glyph position.
    pub active: Rgba,
    /// Color of wandering particles.
    pub idle: Rgba,
}

/// Color theme for the particle swarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Moss,
    Ember,
    Glacier,
    Orchid,
    Ivory,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Moss => ColorTheme::Ember,
            ColorTheme::Ember => ColorTheme::Glacier,
            ColorTheme::Glacier => ColorTheme::Orchid,
            ColorTheme::Orchid => ColorTheme::Ivory,
            ColorTheme::Ivory => ColorTheme::Moss,
        }
    }

    /// Active and idle reference colors for this theme.
    pub fn palette(self) -> Palette {
        match self {
            ColorTheme::Moss => Palette {
                active: Rgba::rgb(0x89, 0xC9, 0x25),
                idle: Rgba::rgb(0x2A, 0x33, 0x20),
            },
            ColorTheme::Ember => Palette {
                active: Rgba::rgb(0xF2, 0xA5, 0x41),
                idle: Rgba::rgb(0x3A, 0x2A, 0x1C),
            },
            ColorTheme::Glacier => Palette {
                active: Rgba::rgb(0x7F, 0xD1, 0xF2),
                idle: Rgba::rgb(0x1E, 0x2C, 0x36),
            },
            ColorTheme::Orchid => Palette {
                active: Rgba::rgb(0xD9, 0x8B, 0xE5),
                idle: Rgba::rgb(0x33, 0x21, 0x3A),
            },
            ColorTheme::Ivory => Palette {
                active: Rgba::rgb(0xED, 0xEA, 0xE0),
                idle: Rgba::rgb(0x33, 0x32, 0x30),
            },
        }
    }

    /// Human readable name, shown in the help line.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Moss => "moss",
            ColorTheme::Ember => "ember",
            ColorTheme::Glacier => "glacier",
            ColorTheme::Orchid => "orchid",
            ColorTheme::Ivory => "ivory",
        }
    }
}
