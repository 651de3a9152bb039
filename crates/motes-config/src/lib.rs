//! Configuration for the motes particle clock.
//!
//! Settings are read from `config.toml` in the platform configuration
//! directory. Every field has a default, so a missing file (or a missing
//! section) simply yields the built-in behavior. The file is never written.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use motes_core::{ColorTheme, TimeFormat};
use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid TOML or has fields of the wrong type.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial 12/24-hour format.
    pub time_format: TimeFormat,
    /// Initial particle palette.
    pub color_theme: ColorTheme,
    /// Particles owned by each digit zone.
    pub particles_per_zone: usize,
    /// Target delay between frames, in milliseconds.
    pub frame_interval_ms: u64,
    pub fonts: FontConfig,
    pub location: LocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_format: TimeFormat::default(),
            color_theme: ColorTheme::default(),
            particles_per_zone: 800,
            frame_interval_ms: 16,
            fonts: FontConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

/// Font asset locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Bold display face used for the digit glyphs.
    pub display_bold: Option<PathBuf>,
    /// Medium display face used for the side labels.
    pub display_medium: Option<PathBuf>,
    /// Body face used for the footer.
    pub body: Option<PathBuf>,
    /// Seconds to wait for all faces before using the built-in ones.
    pub timeout_secs: u64,
}

impl Default for FontConfig {
    fn default() -> Self {
        let font_dir = project_dirs().map(|dirs| dirs.data_dir().join("fonts"));
        let in_font_dir = |name: &str| font_dir.as_ref().map(|dir| dir.join(name));
        Self {
            display_bold: in_font_dir("display-bold.ttf"),
            display_medium: in_font_dir("display-medium.ttf"),
            body: in_font_dir("body.otf"),
            timeout_secs: 3,
        }
    }
}

impl FontConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// IP geolocation lookup settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Whether to look up the location at all.
    pub enabled: bool,
    /// JSON endpoint returning `city` and `country_name`.
    pub endpoint: String,
    /// Fixed delay between failed attempts.
    pub retry_secs: u64,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://ipapi.co/json/".to_string(),
            retry_secs: 30,
            timeout_secs: 10,
        }
    }
}

impl LocationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load configuration from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load configuration from the platform config directory, falling back to
    /// defaults (with a warning) if the file is unreadable or malformed.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            log::warn!("no home directory found, using default configuration");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => {
                log::info!("configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using default configuration");
                Self::default()
            }
        }
    }
}

/// Platform project directories for motes.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "motes")
}

/// Full path of the configuration file.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Config> {
        Config::from_toml(text, Path::new("test.toml"))
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.particles_per_zone, 800);
        assert_eq!(config.fonts.timeout(), Duration::from_secs(3));
        assert_eq!(config.location.retry_delay(), Duration::from_secs(30));
        assert_eq!(config.location.endpoint, "https://ipapi.co/json/");
    }

    #[test]
    fn test_partial_override() {
        let config = parse(
            r#"
            time_format = "12h"
            color_theme = "glacier"
            particles_per_zone = 400

            [fonts]
            display_bold = "/tmp/bold.ttf"

            [location]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.time_format, TimeFormat::TwelveHour);
        assert_eq!(config.color_theme, ColorTheme::Glacier);
        assert_eq!(config.particles_per_zone, 400);
        assert_eq!(
            config.fonts.display_bold,
            Some(PathBuf::from("/tmp/bold.ttf"))
        );
        assert_eq!(config.fonts.timeout_secs, 3);
        assert!(!config.location.enabled);
        assert_eq!(config.location.retry_secs, 30);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let err = parse("particles_per_zone = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/motes/config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
