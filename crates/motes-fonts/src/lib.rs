//! Glyph faces for the motes particle clock.
//!
//! A [`Face`] paints a single character into an RGBA raster. Outline faces
//! come from TrueType/OpenType files; when those are unavailable the built-in
//! block face stands in, so a glyph can always be drawn. [`FontLoader`]
//! loads the three configured faces on background threads and settles on
//! either the loaded set or the built-in fallback set.

mod block;
mod error;
mod face;
mod loader;

pub use block::BlockFace;
pub use error::{FontError, Result};
pub use face::{Face, OutlineFace};
pub use loader::{AssetState, FontLoader, FontSources, LoadStatus};

use std::fmt;

/// The three faces the clock uses.
///
/// Only [`FontRole::DisplayBold`] is drawn with; terminal text cells cannot
/// use a font, so the other two only take part in the fallback decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Bold display face, used for the particle digits.
    DisplayBold,
    /// Medium display face, used for side labels.
    DisplayMedium,
    /// Body face, used for the footer.
    Body,
}

impl FontRole {
    pub const ALL: [FontRole; 3] = [
        FontRole::DisplayBold,
        FontRole::DisplayMedium,
        FontRole::Body,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            FontRole::DisplayBold => 0,
            FontRole::DisplayMedium => 1,
            FontRole::Body => 2,
        }
    }
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontRole::DisplayBold => "display bold",
            FontRole::DisplayMedium => "display medium",
            FontRole::Body => "body",
        };
        f.write_str(name)
    }
}

/// A resolved face for every [`FontRole`].
#[derive(Debug, Clone)]
pub struct FontSet {
    faces: [Face; 3],
    fallback: bool,
}

impl FontSet {
    /// Set made of loaded faces, ordered as [`FontRole::ALL`].
    pub fn new(faces: [Face; 3]) -> Self {
        Self {
            faces,
            fallback: false,
        }
    }

    /// Set made entirely of the built-in block face.
    pub fn fallback() -> Self {
        let block = Face::Block(BlockFace::new());
        Self {
            faces: [block.clone(), block.clone(), block],
            fallback: true,
        }
    }

    pub fn face(&self, role: FontRole) -> &Face {
        &self.faces[role.index()]
    }

    /// Whether the built-in faces were substituted.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_indices_match_all() {
        for (i, role) in FontRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn test_fallback_set() {
        let set = FontSet::fallback();
        assert!(set.is_fallback());
        for role in FontRole::ALL {
            assert!(set.face(role).is_builtin());
        }
    }
}
