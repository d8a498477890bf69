//! Frontend configuration, optionally loaded from `nesling.toml`.

use std::path::Path;

use nesling_core::Region;
use serde::Deserialize;

/// Configuration errors surfaced before the console boots.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Config file is not valid TOML for this schema.
    #[error("cannot parse config {path}: {source}")]
    Parse {
        /// Offending path.
        path: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Console region by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionName {
    /// 60.0988 Hz console.
    #[default]
    Ntsc,
    /// 50 Hz console (APU clock only; video timing stays NTSC).
    Pal,
}

impl From<RegionName> for Region {
    fn from(name: RegionName) -> Self {
        match name {
            RegionName::Ntsc => Region::Ntsc,
            RegionName::Pal => Region::Pal,
        }
    }
}

/// All recognized settings, with their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window title (kept for windowed frontends).
    pub title: String,
    /// Initial window scale factor.
    pub scale: u32,
    /// VSync request.
    pub vsync: bool,
    /// Snap the window to integer multiples of 256x240.
    pub integer_scale: bool,
    /// Audio ring capacity in samples.
    pub buffer_frames: usize,
    /// Audio output rate.
    pub sample_rate_hz: u32,
    /// Console region.
    pub region: RegionName,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "nesling".to_string(),
            scale: 3,
            vsync: false,
            integer_scale: true,
            buffer_frames: 1024,
            sample_rate_hz: 48_000,
            region: RegionName::Ntsc,
        }
    }
}

impl Config {
    /// Parse a config file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load `path` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Fails only when the file exists but is unreadable or invalid.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
