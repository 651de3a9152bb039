//! Error types for font loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::FontRole;

/// Result type alias for font operations.
pub type Result<T> = std::result::Result<T, FontError>;

/// Errors that can occur while loading a face.
#[derive(Error, Debug)]
pub enum FontError {
    /// The font file could not be read.
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not a usable font.
    #[error("invalid font data in {path}")]
    Invalid { path: PathBuf },

    /// No file was configured for this role.
    #[error("no font configured for the {0} role")]
    NotConfigured(FontRole),

    /// The loading thread went away before reporting.
    #[error("font loader for the {0} role exited without a result")]
    Abandoned(FontRole),
}
