//! Core types shared across the motes particle clock crates.

mod clock;
mod color;
mod theme;

pub use clock::{ClockReading, TimeFormat};
pub use color::Rgba;
pub use theme::{ColorTheme, Palette};

/// Logical width of the display surface.
pub const DISPLAY_WIDTH: f32 = 1920.0;

/// Logical height of the display surface.
pub const DISPLAY_HEIGHT: f32 = 1080.0;

/// Number of digit zones (HH:MM).
pub const ZONE_COUNT: usize = 4;
